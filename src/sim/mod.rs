//! Off-hardware simulation: scripted key-event timelines against the keymap.

pub mod runner;
pub mod script;

// Re-export the simulation types
pub use runner::{SimReport, Simulator, TraceEntry};
pub use script::{parse_script, ScriptEvent};
