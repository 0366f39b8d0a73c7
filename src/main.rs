//! Padmap - keymap engine and tooling for the MP20 macropad
//!
//! The CLI exposes the keymap's layers, tap dances, and macros for
//! inspection, simulation, validation, export, and firmware generation.

use clap::{Parser, Subcommand};
use padmap::cli::{
    ConfigArgs, ExportArgs, GenerateArgs, KeycodesArgs, ShowArgs, SimulateArgs, TapDanceArgs,
    ValidateArgs,
};
use padmap::constants::APP_BINARY_NAME;

/// Padmap - keymap engine and tooling for the MP20 macropad
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Command,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Show the keymap's layer diagrams
    Show(ShowArgs),
    /// List the keycodes the keymap uses, or find where one is bound
    Keycodes(KeycodesArgs),
    /// Inspect the keymap's tap dance gestures
    TapDance(TapDanceArgs),
    /// Run a scripted event timeline against the keymap
    Simulate(SimulateArgs),
    /// Validate the keymap for errors and warnings
    Validate(ValidateArgs),
    /// Export the keymap as a Markdown reference document
    Export(ExportArgs),
    /// Generate the QMK keymap.c for the keymap
    Generate(GenerateArgs),
    /// Manage padmap configuration
    Config(ConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Show(args) => args.execute(),
        Command::Keycodes(args) => args.execute(),
        Command::TapDance(args) => args.execute(),
        Command::Simulate(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Export(args) => args.execute(),
        Command::Generate(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(error.exit_code());
    }
}
