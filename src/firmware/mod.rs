//! Firmware generation and validation.
//!
//! This module emits the QMK keymap.c equivalent of the compiled-in keymap
//! and validates the invariants generation relies on. Compiling and flashing
//! the result is the QMK toolchain's job, not this crate's.

pub mod codegen;
pub mod validator;

// Re-export firmware types
pub use codegen::{generate_keymap_c, write_keymap_c};
pub use validator::{KeymapValidator, ValidationReport};
