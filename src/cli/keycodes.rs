//! Keycode listing and lookup command.

use crate::cli::common::{CliError, CliResult};
use crate::models::{Keycode, Keymap};
use clap::Args;
use serde::Serialize;

/// List the keycodes the keymap uses, or find where one is bound
#[derive(Debug, Clone, Args)]
pub struct KeycodesArgs {
    /// Find where a keycode is bound (QMK spelling, e.g. 'LCTL(KC_C)')
    #[arg(short, long, value_name = "KEYCODE")]
    pub find: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeycodeListResponse {
    keycodes: Vec<KeycodeInfo>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct KeycodeInfo {
    syntax: String,
    description: String,
    uses: usize,
}

#[derive(Debug, Serialize)]
struct FindResponse {
    syntax: String,
    locations: Vec<Location>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct Location {
    layer: String,
    row: usize,
    col: usize,
}

impl KeycodesArgs {
    /// Execute the keycodes command
    pub fn execute(&self) -> CliResult<()> {
        let keymap = Keymap::mp20_default();

        match &self.find {
            Some(syntax) => execute_find(&keymap, syntax, self.json),
            None => execute_list(&keymap, self.json),
        }
    }
}

fn execute_list(keymap: &Keymap, json: bool) -> CliResult<()> {
    let used = keymap.used_keycodes();

    if json {
        let keycodes: Vec<KeycodeInfo> = used
            .iter()
            .map(|(code, uses)| KeycodeInfo {
                syntax: code.qmk_syntax(),
                description: code.description(),
                uses: *uses,
            })
            .collect();
        let response = KeycodeListResponse {
            count: keycodes.len(),
            keycodes,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
        );
    } else {
        let width = used
            .iter()
            .map(|(code, _)| code.qmk_syntax().len())
            .max()
            .unwrap_or(0);
        for (code, uses) in &used {
            let plural = if *uses == 1 { "use" } else { "uses" };
            println!(
                "{:<width$}  {} ({uses} {plural})",
                code.qmk_syntax(),
                code.description()
            );
        }
    }

    Ok(())
}

fn execute_find(keymap: &Keymap, syntax: &str, json: bool) -> CliResult<()> {
    let code: Keycode = syntax
        .parse()
        .map_err(|e| CliError::usage(format!("{e}")))?;

    let locations: Vec<Location> = keymap
        .positions_of(code)
        .into_iter()
        .map(|(layer, row, col)| Location {
            layer: layer.name().to_string(),
            row,
            col,
        })
        .collect();

    if json {
        let response = FindResponse {
            syntax: code.qmk_syntax(),
            count: locations.len(),
            locations,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&response)
                .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
        );
    } else if locations.is_empty() {
        println!("{} is not bound anywhere", code.qmk_syntax());
    } else {
        for location in &locations {
            println!(
                "{}: {} ({}, {})",
                code.qmk_syntax(),
                location.layer,
                location.row,
                location.col
            );
        }
    }

    Ok(())
}
