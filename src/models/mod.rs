//! Data models for the MP20 keymap.
//!
//! This module contains the core data structures: the keycode vocabulary,
//! layer identifiers, and the compiled-in keymap grids. Models are
//! independent of the engine and CLI layers.

pub mod keycode;
pub mod keymap;
pub mod layer;

// Re-export all model types
pub use keycode::{Key, Keycode, MacroId, Modifiers, TapDanceKey};
pub use keymap::{Keymap, LayerGrid, MATRIX_COLS, MATRIX_ROWS};
pub use layer::LayerId;
