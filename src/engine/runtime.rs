//! The keymap runtime: layer-selection state machine and interception hook.
//!
//! [`KeymapRuntime`] is the stateful component the host (or the simulator)
//! registers its callbacks against: [`on_gesture`] receives resolved
//! tap-dance gestures, [`on_key_event`] gets first refusal over every key
//! event before default handling.
//!
//! [`on_gesture`]: KeymapRuntime::on_gesture
//! [`on_key_event`]: KeymapRuntime::on_key_event

use crate::engine::layer_state::LayerState;
use crate::engine::tap_dance::Gesture;
use crate::models::{Keycode, Keymap, LayerId, TapDanceKey};

/// A single key transition as delivered to the interception hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The keycode resolved for the pressed position.
    pub code: Keycode,
    /// True on press, false on release.
    pub pressed: bool,
}

impl KeyEvent {
    /// A press event.
    #[must_use]
    pub const fn press(code: Keycode) -> Self {
        Self {
            code,
            pressed: true,
        }
    }

    /// A release event.
    #[must_use]
    pub const fn release(code: Keycode) -> Self {
        Self {
            code,
            pressed: false,
        }
    }
}

/// Destination for text the interception hook emits.
///
/// On hardware this is the firmware's text-injection facility; in tests and
/// the simulator a `Vec<String>` collects the output.
pub trait TextSink {
    /// Emits a literal string.
    fn send_text(&mut self, text: &str);
}

impl TextSink for Vec<String> {
    fn send_text(&mut self, text: &str) {
        self.push(text.to_string());
    }
}

/// What a gesture does to one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerOp {
    /// Toggle: on if off, off if on.
    Invert,
    /// Force off.
    Off,
}

/// One layer mutation in a gesture's effect list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerEffect {
    /// Target layer.
    pub layer: LayerId,
    /// Operation applied to it.
    pub op: LayerOp,
}

const fn invert(layer: LayerId) -> LayerEffect {
    LayerEffect {
        layer,
        op: LayerOp::Invert,
    }
}

const fn off(layer: LayerId) -> LayerEffect {
    LayerEffect {
        layer,
        op: LayerOp::Off,
    }
}

const WORKSPACE_SINGLE: [LayerEffect; 3] = [
    invert(LayerId::Workspace),
    off(LayerId::Arrows),
    off(LayerId::Macros),
];

const ARROWS_SINGLE: [LayerEffect; 3] = [
    off(LayerId::Workspace),
    invert(LayerId::Arrows),
    off(LayerId::Macros),
];

// Double-tapping either bound key lands here: Macros toggled, the other two
// overlays forced off. Intentional convergent behavior, kept exactly.
const EITHER_DOUBLE: [LayerEffect; 3] = [
    off(LayerId::Workspace),
    off(LayerId::Arrows),
    invert(LayerId::Macros),
];

/// The layer mutations a gesture performs, in order. Tap counts outside
/// {1, 2} map to an empty effect list (no-op by policy).
#[must_use]
pub fn gesture_effects(key: TapDanceKey, taps: u8) -> &'static [LayerEffect] {
    match (key, taps) {
        (TapDanceKey::Workspace, 1) => &WORKSPACE_SINGLE,
        (TapDanceKey::Arrows, 1) => &ARROWS_SINGLE,
        (_, 2) => &EITHER_DOUBLE,
        _ => &[],
    }
}

/// The stateful keymap core: owns the layer state and implements both host
/// callback contracts.
#[derive(Debug)]
pub struct KeymapRuntime {
    keymap: Keymap,
    layers: LayerState,
}

impl KeymapRuntime {
    /// Creates a runtime over a keymap with only the base layer active.
    #[must_use]
    pub const fn new(keymap: Keymap) -> Self {
        Self {
            keymap,
            layers: LayerState::new(),
        }
    }

    /// A runtime over the MP20 default keymap.
    #[must_use]
    pub fn mp20() -> Self {
        Self::new(Keymap::mp20_default())
    }

    /// The keymap this runtime serves.
    #[must_use]
    pub const fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    /// The current layer activation state.
    #[must_use]
    pub const fn layer_state(&self) -> &LayerState {
        &self.layers
    }

    /// Gesture-completion handler: applies the layer-selection transition for
    /// a resolved tap-dance gesture. After the call returns, at most one
    /// overlay layer is active.
    pub fn on_gesture(&mut self, gesture: Gesture) {
        for effect in gesture_effects(gesture.key, gesture.taps) {
            match effect.op {
                LayerOp::Invert => self.layers.invert(effect.layer),
                LayerOp::Off => self.layers.deactivate(effect.layer),
            }
        }
    }

    /// Interception hook: sees every key event before default handling.
    ///
    /// Returns `false` to suppress default handling (the event was consumed
    /// here), `true` to defer to the host. Only a macro press is consumed:
    /// its text goes to `sink` exactly once. Releases and every other code
    /// pass through untouched.
    pub fn on_key_event(&mut self, event: KeyEvent, sink: &mut dyn TextSink) -> bool {
        if event.pressed {
            if let Keycode::Macro(id) = event.code {
                sink.send_text(id.text());
                return false;
            }
        }
        true
    }

    /// Resolves the keycode a physical position produces under the current
    /// layer state: scans active layers top-down, skipping transparent cells.
    ///
    /// Returns `None` when the position is out of bounds or falls through
    /// every active layer to a no-op.
    #[must_use]
    pub fn resolve(&self, row: usize, col: usize) -> Option<Keycode> {
        for layer in self.layers.iter_top_down() {
            match self.keymap.grid(layer).key_at(row, col) {
                Some(code) if code.is_transparent() => {}
                Some(code) if code.is_no_op() => return None,
                Some(code) => return Some(*code),
                None => return None,
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Key, MacroId};

    #[test]
    fn test_gesture_effects_noop_counts() {
        assert!(gesture_effects(TapDanceKey::Workspace, 0).is_empty());
        assert!(gesture_effects(TapDanceKey::Workspace, 3).is_empty());
        assert!(gesture_effects(TapDanceKey::Arrows, 255).is_empty());
    }

    #[test]
    fn test_resolve_base_layer() {
        let runtime = KeymapRuntime::mp20();
        assert_eq!(
            runtime.resolve(0, 0),
            Some(Keycode::Plain(Key::Kp7))
        );
        assert_eq!(
            runtime.resolve(0, 3),
            Some(Keycode::TapDance(TapDanceKey::Workspace))
        );
    }

    #[test]
    fn test_resolve_falls_through_transparent_overlay() {
        let mut runtime = KeymapRuntime::mp20();
        runtime.on_gesture(Gesture::new(TapDanceKey::Arrows, 1));

        // Column 4 is transparent on the Arrows overlay: falls to base.
        assert_eq!(
            runtime.resolve(1, 4),
            Some(Keycode::Plain(Key::MediaNext))
        );
        // Column 1 is remapped by the overlay.
        assert_eq!(runtime.resolve(3, 1), Some(Keycode::Plain(Key::Down)));
    }

    #[test]
    fn test_resolve_no_op_cell() {
        let mut runtime = KeymapRuntime::mp20();
        runtime.on_gesture(Gesture::new(TapDanceKey::Arrows, 1));
        // (2, 0) is a dead cell on the Arrows overlay.
        assert_eq!(runtime.resolve(2, 0), None);
    }

    #[test]
    fn test_resolve_out_of_bounds() {
        let runtime = KeymapRuntime::mp20();
        assert_eq!(runtime.resolve(9, 9), None);
    }

    #[test]
    fn test_hook_consumes_macro_press_only() {
        let mut runtime = KeymapRuntime::mp20();
        let mut sink: Vec<String> = Vec::new();

        let press = KeyEvent::press(Keycode::Macro(MacroId::Boop));
        assert!(!runtime.on_key_event(press, &mut sink));
        assert_eq!(sink, vec!["Boop. "]);

        let release = KeyEvent::release(Keycode::Macro(MacroId::Boop));
        assert!(runtime.on_key_event(release, &mut sink));
        assert_eq!(sink.len(), 1);
    }
}
