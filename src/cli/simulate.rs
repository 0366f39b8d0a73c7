//! Simulation command: play scripted key events against the keymap.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::sim::{parse_script, SimReport, Simulator};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Run a scripted event timeline against the keymap
#[derive(Debug, Clone, Args)]
pub struct SimulateArgs {
    /// Path to a simulation script file
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Inline event (may be repeated), e.g. -e 'tap 0 3' -e 'wait 250'
    #[arg(short, long = "event", value_name = "EVENT")]
    pub events: Vec<String>,

    /// Override the tapping term in milliseconds
    #[arg(long, value_name = "MS")]
    pub tapping_term: Option<u64>,

    /// Output the transcript as JSON
    #[arg(long)]
    pub json: bool,
}

impl SimulateArgs {
    /// Execute the simulate command
    pub fn execute(&self) -> CliResult<()> {
        let script_text = self.collect_script()?;
        let events = parse_script(&script_text)
            .map_err(|e| CliError::usage(format!("Invalid script: {e:#}")))?;

        let tapping_term = match self.tapping_term {
            Some(ms) if ms == 0 => {
                return Err(CliError::usage("Tapping term must be greater than zero"))
            }
            Some(ms) => ms,
            None => {
                let config = Config::load()
                    .map_err(|e| CliError::io(format!("Failed to load config: {e}")))?;
                config.simulation.tapping_term_ms
            }
        };

        let report = Simulator::new(tapping_term).run(&events);

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            print_transcript(&report);
        }

        Ok(())
    }

    fn collect_script(&self) -> CliResult<String> {
        match (&self.script, self.events.is_empty()) {
            (Some(path), _) => fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("Failed to read script {}: {e}", path.display()))),
            (None, false) => Ok(self.events.join("\n")),
            (None, true) => Err(CliError::usage(
                "No input: pass --script FILE or one or more --event lines",
            )),
        }
    }
}

fn print_transcript(report: &SimReport) {
    println!("Tapping term: {}ms", report.tapping_term_ms);
    println!();
    for step in &report.steps {
        let mut line = format!("[{:>6}ms] {}", step.at_ms, step.input);
        if let Some(resolved) = &step.resolved {
            line.push_str(&format!(" -> {resolved}"));
        }
        if let Some(gesture) = &step.gesture {
            line.push_str(&format!(" => {gesture}"));
        }
        if let Some(emitted) = &step.emitted {
            line.push_str(&format!(" => types {emitted:?}"));
        }
        println!("{line}");
        if step.gesture.is_some() {
            println!("           layers: {}", step.layers.join(", "));
        }
    }
    println!();
    println!("Final layers: {}", report.final_layers.join(", "));
    if !report.emitted_text.is_empty() {
        let joined: Vec<String> = report
            .emitted_text
            .iter()
            .map(|text| format!("{text:?}"))
            .collect();
        println!("Emitted text: {}", joined.join(", "));
    }
}
