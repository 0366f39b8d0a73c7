//! Validation command for the keymap.

use crate::cli::common::{CliError, CliResult};
use crate::firmware::validator::KeymapValidator;
use crate::models::Keymap;
use clap::Args;
use serde::Serialize;

/// Validate the keymap for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct ValidateResponse {
    valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let keymap = Keymap::mp20_default();
        let report = KeymapValidator::new(&keymap).validate();
        let valid = report.is_valid();

        if self.json {
            let response = ValidateResponse {
                valid,
                errors: report.errors.iter().map(|e| e.message.clone()).collect(),
                warnings: report.warnings.iter().map(|w| w.message.clone()).collect(),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            for error in &report.errors {
                println!("  ✗ {error}");
            }
            for warning in &report.warnings {
                println!("  ⚠ {warning}");
            }
            if valid && report.warnings.is_empty() {
                println!("✓ Keymap is valid");
            }
        }

        if !valid {
            return Err(CliError::validation("Keymap validation failed"));
        }
        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }
        Ok(())
    }
}
