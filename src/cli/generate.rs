//! Generate command for firmware files.

use crate::cli::common::{CliError, CliResult};
use crate::firmware::validator::KeymapValidator;
use crate::firmware::{generate_keymap_c, write_keymap_c};
use crate::models::Keymap;
use clap::Args;
use std::path::PathBuf;

/// Generate the QMK keymap.c for the keymap
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Output directory for keymap.c (defaults to the current directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the source to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let keymap = Keymap::mp20_default();

        // Refuse to generate firmware from a keymap that fails validation.
        let report = KeymapValidator::new(&keymap).validate();
        if !report.is_valid() {
            for error in &report.errors {
                eprintln!("  ✗ {error}");
            }
            return Err(CliError::validation("Keymap validation failed"));
        }

        if self.stdout {
            print!("{}", generate_keymap_c(&keymap));
            return Ok(());
        }

        let dir = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let path = write_keymap_c(&keymap, &dir)
            .map_err(|e| CliError::io(format!("Failed to write firmware source: {e}")))?;
        println!("Generated {}", path.display());
        Ok(())
    }
}
