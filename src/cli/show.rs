//! Layer diagram display command.

use crate::cli::common::{CliError, CliResult};
use crate::export::{render_all_layers, render_layer_diagram};
use crate::models::{Keymap, LayerId};
use clap::Args;
use serde::Serialize;

/// Show the keymap's layer diagrams
#[derive(Debug, Clone, Args)]
pub struct ShowArgs {
    /// Show only one layer (by name)
    #[arg(short, long, value_name = "NAME")]
    pub layer: Option<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ShowResponse {
    layers: Vec<LayerInfo>,
    count: usize,
}

#[derive(Debug, Serialize)]
struct LayerInfo {
    number: usize,
    name: String,
    overlay: bool,
    grid: Vec<Vec<String>>,
}

impl ShowArgs {
    /// Execute the show command
    pub fn execute(&self) -> CliResult<()> {
        let keymap = Keymap::mp20_default();

        let layers: Vec<LayerId> = match &self.layer {
            Some(name) => {
                let layer =
                    LayerId::from_name(name).map_err(|e| CliError::usage(e.to_string()))?;
                vec![layer]
            }
            None => LayerId::ALL
                .into_iter()
                .filter(|layer| !layer.is_reserved())
                .collect(),
        };

        if self.json {
            let infos: Vec<LayerInfo> = layers
                .iter()
                .map(|layer| LayerInfo {
                    number: layer.index(),
                    name: layer.name().to_string(),
                    overlay: layer.is_overlay(),
                    grid: keymap
                        .grid(*layer)
                        .rows()
                        .map(|cols| cols.iter().map(|code| code.qmk_syntax()).collect())
                        .collect(),
                })
                .collect();
            let response = ShowResponse {
                count: infos.len(),
                layers: infos,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else if self.layer.is_some() {
            for layer in layers {
                println!("{}", render_layer_diagram(&keymap, layer));
            }
        } else {
            println!("{}", render_all_layers(&keymap));
        }

        Ok(())
    }
}
