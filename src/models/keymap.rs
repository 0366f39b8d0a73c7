//! The compiled-in MP20 keymap: per-layer key grids.

use crate::models::keycode::{Key, Keycode, MacroId, Modifiers, TapDanceKey};
use crate::models::layer::LayerId;

/// Physical matrix rows on the MP20.
pub const MATRIX_ROWS: usize = 4;
/// Physical matrix columns on the MP20.
pub const MATRIX_COLS: usize = 5;

/// A full 4x5 grid of keycodes for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerGrid {
    keys: [[Keycode; MATRIX_COLS]; MATRIX_ROWS],
}

impl LayerGrid {
    /// Creates a grid from row-major keycode arrays.
    #[must_use]
    pub const fn new(keys: [[Keycode; MATRIX_COLS]; MATRIX_ROWS]) -> Self {
        Self { keys }
    }

    /// An all-transparent grid (used for the reserved layer).
    #[must_use]
    pub const fn transparent() -> Self {
        Self {
            keys: [[Keycode::Transparent; MATRIX_COLS]; MATRIX_ROWS],
        }
    }

    /// The keycode at a matrix position, or `None` when out of bounds.
    #[must_use]
    pub fn key_at(&self, row: usize, col: usize) -> Option<&Keycode> {
        self.keys.get(row).and_then(|r| r.get(col))
    }

    /// Iterates rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[Keycode; MATRIX_COLS]> {
        self.keys.iter()
    }
}

// Grid literal shorthands, mirroring the aliases a QMK keymap would #define.
const TRNS: Keycode = Keycode::Transparent;
const XXXX: Keycode = Keycode::NoOp;
const TD_WKSP: Keycode = Keycode::TapDance(TapDanceKey::Workspace);
const TD_ARWS: Keycode = Keycode::TapDance(TapDanceKey::Arrows);
const BOOP: Keycode = Keycode::Macro(MacroId::Boop);

// Windows workspace controls.
const WS_NEW: Keycode = Keycode::Chord(Modifiers::CTRL_GUI, Key::D);
const WS_QUIT: Keycode = Keycode::Chord(Modifiers::CTRL_GUI, Key::F4);
const WS_LEFT: Keycode = Keycode::Chord(Modifiers::CTRL_GUI, Key::Left);
const WS_RIGHT: Keycode = Keycode::Chord(Modifiers::CTRL_GUI, Key::Right);

// Editing commands.
const COPY: Keycode = Keycode::Chord(Modifiers::CTRL, Key::C);
const CUT: Keycode = Keycode::Chord(Modifiers::CTRL, Key::X);
const PASTE: Keycode = Keycode::Chord(Modifiers::CTRL, Key::V);
const SAVE: Keycode = Keycode::Chord(Modifiers::CTRL, Key::S);
const SELECT_ALL: Keycode = Keycode::Chord(Modifiers::CTRL, Key::A);
const UNDO: Keycode = Keycode::Chord(Modifiers::CTRL, Key::Z);

/// The complete keymap: one grid per layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    grids: [LayerGrid; LayerId::COUNT],
}

impl Keymap {
    /// The MP20 default keymap.
    #[must_use]
    pub fn mp20_default() -> Self {
        use Keycode::Plain as P;

        let numpad = LayerGrid::new([
            [P(Key::Kp7), P(Key::Kp8), P(Key::Kp9), TD_WKSP, TD_ARWS],
            [P(Key::Kp4), P(Key::Kp5), P(Key::Kp6), P(Key::MediaPrev), P(Key::MediaNext)],
            [P(Key::Kp1), P(Key::Kp2), P(Key::Kp3), P(Key::Mute), P(Key::MediaPlay)],
            [P(Key::Kp0), P(Key::KpDot), P(Key::KpEnter), P(Key::VolumeDown), P(Key::VolumeUp)],
        ]);

        let workspace = LayerGrid::new([
            [P(Key::LeftAlt), WS_NEW, P(Key::F4), TRNS, TRNS],
            [WS_LEFT, WS_QUIT, WS_RIGHT, TRNS, TRNS],
            [SELECT_ALL, SAVE, UNDO, TRNS, TRNS],
            [CUT, COPY, PASTE, TRNS, TRNS],
        ]);

        let arrows = LayerGrid::new([
            [P(Key::Insert), P(Key::Home), P(Key::PageUp), TRNS, TRNS],
            [P(Key::Delete), P(Key::End), P(Key::PageDown), TRNS, TRNS],
            [XXXX, P(Key::Up), XXXX, TRNS, TRNS],
            [P(Key::Left), P(Key::Down), P(Key::Right), TRNS, TRNS],
        ]);

        let macros = LayerGrid::new([
            [XXXX, XXXX, P(Key::NumLock), TRNS, TRNS],
            [BOOP, BOOP, BOOP, TRNS, TRNS],
            [BOOP, BOOP, BOOP, TRNS, TRNS],
            [XXXX, XXXX, XXXX, TRNS, TRNS],
        ]);

        Self {
            grids: [
                numpad,
                workspace,
                arrows,
                macros,
                LayerGrid::transparent(),
            ],
        }
    }

    /// The grid for a layer.
    #[must_use]
    pub fn grid(&self, layer: LayerId) -> &LayerGrid {
        &self.grids[layer.index()]
    }

    /// Positions of the tap-dance toggles on the base layer.
    #[must_use]
    pub fn tap_dance_positions(&self) -> Vec<(TapDanceKey, usize, usize)> {
        let mut positions = Vec::new();
        let base = self.grid(LayerId::Numpad);
        for (row, cols) in base.rows().enumerate() {
            for (col, code) in cols.iter().enumerate() {
                if let Keycode::TapDance(td) = code {
                    positions.push((*td, row, col));
                }
            }
        }
        positions
    }

    /// All positions a keycode appears at, across every layer.
    #[must_use]
    pub fn positions_of(&self, code: Keycode) -> Vec<(LayerId, usize, usize)> {
        let mut positions = Vec::new();
        for layer in LayerId::ALL {
            for (row, cols) in self.grid(layer).rows().enumerate() {
                for (col, cell) in cols.iter().enumerate() {
                    if *cell == code {
                        positions.push((layer, row, col));
                    }
                }
            }
        }
        positions
    }

    /// Distinct keycodes used by the keymap with usage counts, in
    /// first-appearance order. Transparent and no-op cells are skipped.
    #[must_use]
    pub fn used_keycodes(&self) -> Vec<(Keycode, usize)> {
        let mut used: Vec<(Keycode, usize)> = Vec::new();
        for layer in LayerId::ALL {
            for cols in self.grid(layer).rows() {
                for code in cols {
                    if code.is_transparent() || code.is_no_op() {
                        continue;
                    }
                    match used.iter_mut().find(|(seen, _)| seen == code) {
                        Some((_, count)) => *count += 1,
                        None => used.push((*code, 1)),
                    }
                }
            }
        }
        used
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::mp20_default()
    }
}
