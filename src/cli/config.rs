//! Configuration management CLI commands.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Manage padmap configuration
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Config subcommand to execute
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration
    Show(ShowArgs),
    /// Print the configuration file path
    Path,
    /// Update configuration values
    Set(SetArgs),
}

/// Show configuration
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Set configuration values
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Tapping term in milliseconds
    #[arg(long, value_name = "MS")]
    pub tapping_term: Option<u64>,

    /// Export output directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ConfigResponse {
    tapping_term_ms: u64,
    output_dir: String,
}

impl ConfigArgs {
    /// Execute the config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => execute_show(args),
            ConfigCommand::Path => execute_path(),
            ConfigCommand::Set(args) => execute_set(args),
        }
    }
}

fn load() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::io(format!("Failed to load config: {e}")))
}

/// Execute the show subcommand
fn execute_show(args: &ShowArgs) -> CliResult<()> {
    let config = load()?;

    if args.json {
        let response = ConfigResponse {
            tapping_term_ms: config.simulation.tapping_term_ms,
            output_dir: config.export.output_dir.display().to_string(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
        );
    } else {
        println!("tapping_term_ms = {}", config.simulation.tapping_term_ms);
        println!("output_dir = {}", config.export.output_dir.display());
    }
    Ok(())
}

/// Execute the path subcommand
fn execute_path() -> CliResult<()> {
    let path = Config::config_file_path()
        .map_err(|e| CliError::io(format!("Failed to resolve config path: {e}")))?;
    println!("{}", path.display());
    Ok(())
}

/// Execute the set subcommand
fn execute_set(args: &SetArgs) -> CliResult<()> {
    if args.tapping_term.is_none() && args.output_dir.is_none() {
        return Err(CliError::usage(
            "Nothing to set: pass --tapping-term and/or --output-dir",
        ));
    }

    let mut config = load()?;
    if let Some(ms) = args.tapping_term {
        config.simulation.tapping_term_ms = ms;
    }
    if let Some(dir) = &args.output_dir {
        config.export.output_dir = dir.clone();
    }

    config
        .validate()
        .map_err(|e| CliError::usage(e.to_string()))?;
    config
        .save()
        .map_err(|e| CliError::io(format!("Failed to save config: {e}")))?;
    println!("Configuration saved");
    Ok(())
}
