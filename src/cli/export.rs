//! Export command for generating markdown documentation.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::export::{generate_markdown, save_markdown};
use crate::models::Keymap;
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Export the keymap as a Markdown reference document
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    /// Output file (defaults to the configured export directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let keymap = Keymap::mp20_default();

        if self.stdout {
            print!("{}", generate_markdown(&keymap));
            return Ok(());
        }

        let path = match &self.output {
            Some(path) => path.clone(),
            None => {
                let config = Config::load()
                    .map_err(|e| CliError::io(format!("Failed to load config: {e}")))?;
                config.export.output_dir.join("mp20-keymap.md")
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    CliError::io(format!("Failed to create {}: {e}", parent.display()))
                })?;
            }
        }

        save_markdown(&keymap, &path)
            .map_err(|e| CliError::io(format!("Failed to write export: {e}")))?;
        println!("Exported keymap reference to {}", path.display());
        Ok(())
    }
}
