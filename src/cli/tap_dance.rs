//! Tap dance listing command.

use crate::cli::common::{CliError, CliResult};
use crate::engine::gesture_effects;
use crate::models::{Keymap, TapDanceKey};
use clap::{Args, Subcommand};
use serde::Serialize;

/// Inspect the keymap's tap dance gestures
#[derive(Debug, Clone, Args)]
pub struct TapDanceArgs {
    /// Tap dance subcommand to execute
    #[command(subcommand)]
    pub command: TapDanceCommand,
}

/// Tap dance subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum TapDanceCommand {
    /// List the tap dance bindings and their gesture effects
    List(ListArgs),
}

/// List tap dance bindings
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct TapDanceListResponse {
    tap_dances: Vec<TapDanceInfo>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct TapDanceInfo {
    name: String,
    position: (usize, usize),
    single_tap: String,
    double_tap: String,
}

impl TapDanceArgs {
    /// Execute the tap-dance subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            TapDanceCommand::List(args) => execute_list(args),
        }
    }
}

/// Describes what a gesture does, e.g. `invert Workspace, off Arrows, off Macros`.
fn describe_effects(key: TapDanceKey, taps: u8) -> String {
    let effects = gesture_effects(key, taps);
    if effects.is_empty() {
        return "no effect".to_string();
    }
    effects
        .iter()
        .map(|effect| {
            let verb = match effect.op {
                crate::engine::LayerOp::Invert => "invert",
                crate::engine::LayerOp::Off => "off",
            };
            format!("{verb} {}", effect.layer)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Execute the list subcommand
fn execute_list(args: &ListArgs) -> CliResult<()> {
    let keymap = Keymap::mp20_default();

    let tap_dances: Vec<TapDanceInfo> = keymap
        .tap_dance_positions()
        .into_iter()
        .map(|(key, row, col)| TapDanceInfo {
            name: key.name().to_string(),
            position: (row, col),
            single_tap: describe_effects(key, 1),
            double_tap: describe_effects(key, 2),
        })
        .collect();

    if args.json {
        let response = TapDanceListResponse {
            count: tap_dances.len(),
            tap_dances,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
        );
    } else {
        for td in &tap_dances {
            println!(
                "{} at ({}, {}): single=[{}], double=[{}]",
                td.name, td.position.0, td.position.1, td.single_tap, td.double_tap
            );
        }
    }

    Ok(())
}
