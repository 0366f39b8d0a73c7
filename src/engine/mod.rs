//! The keymap's logical core: layer state, gestures, and the runtime.

pub mod layer_state;
pub mod runtime;
pub mod tap_dance;

// Re-export the engine types
pub use layer_state::LayerState;
pub use runtime::{gesture_effects, KeyEvent, KeymapRuntime, LayerEffect, LayerOp, TextSink};
pub use tap_dance::{Gesture, TapDanceCounter};
