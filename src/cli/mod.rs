//! CLI command handlers for padmap.
//!
//! This module provides headless, scriptable access to the keymap engine
//! for automation, testing, and CI integration.

pub mod common;
pub mod config;
pub mod export;
pub mod generate;
pub mod keycodes;
pub mod show;
pub mod simulate;
pub mod tap_dance;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use generate::GenerateArgs;
pub use keycodes::KeycodesArgs;
pub use show::ShowArgs;
pub use simulate::SimulateArgs;
pub use tap_dance::TapDanceArgs;
pub use validate::ValidateArgs;
