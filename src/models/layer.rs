//! Layer identifiers for the MP20 keymap.

use anyhow::{bail, Result};
use std::fmt;

/// The keymap's layers, in stacking order.
///
/// Numpad is the base layer and is always active. Workspace, Arrows, and
/// Macros form the mutually exclusive overlay group: the gesture handlers
/// guarantee at most one of them is active at a time. Modifier is reserved
/// and carries no bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerId {
    /// Base layer: numpad digits, media keys, and the tap-dance toggles.
    Numpad,
    /// Windows workspace controls and editing chords.
    Workspace,
    /// Navigation cluster and arrow keys.
    Arrows,
    /// Custom macro keys.
    Macros,
    /// Reserved; all-transparent.
    Modifier,
}

impl LayerId {
    /// All layers, lowest first.
    pub const ALL: [Self; 5] = [
        Self::Numpad,
        Self::Workspace,
        Self::Arrows,
        Self::Macros,
        Self::Modifier,
    ];

    /// Number of layers.
    pub const COUNT: usize = Self::ALL.len();

    /// Layer number (0-based, stacking order).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable layer name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Numpad => "Numpad",
            Self::Workspace => "Workspace",
            Self::Arrows => "Arrows",
            Self::Macros => "Macros",
            Self::Modifier => "Modifier",
        }
    }

    /// C identifier used in the generated firmware.
    #[must_use]
    pub const fn qmk_ident(self) -> &'static str {
        match self {
            Self::Numpad => "_NUMPAD",
            Self::Workspace => "_WRKSPC",
            Self::Arrows => "_ARROWS",
            Self::Macros => "_MACROS",
            Self::Modifier => "_MOD",
        }
    }

    /// True for the always-active base layer.
    #[must_use]
    pub const fn is_base(self) -> bool {
        matches!(self, Self::Numpad)
    }

    /// True for members of the mutually exclusive overlay group.
    #[must_use]
    pub const fn is_overlay(self) -> bool {
        matches!(self, Self::Workspace | Self::Arrows | Self::Macros)
    }

    /// True for the reserved layer.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        matches!(self, Self::Modifier)
    }

    /// Looks up a layer by name, case-insensitively.
    pub fn from_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        for layer in Self::ALL {
            if layer.name().to_lowercase() == lower {
                return Ok(layer);
            }
        }
        bail!("Unknown layer: {name} (expected one of Numpad, Workspace, Arrows, Macros, Modifier)")
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
