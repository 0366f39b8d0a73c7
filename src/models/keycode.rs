//! Keycode vocabulary for the MP20 keymap.
//!
//! The keymap is compiled-in data, so the keycode set is a closed enumeration
//! rather than free-form strings. QMK spellings (`KC_KP_7`, `LCTL(LGUI(KC_D))`,
//! `TD(TD_WRKSPC)`) are the external syntax used for display, export, and the
//! `keycodes --find` lookup.

use anyhow::{bail, Context, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Basic (unmodified) keys the MP20 keymap uses.
///
/// Variant names mirror their QMK keycodes; see [`Key::qmk_name`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpDot,
    KpEnter,
    MediaPrev,
    MediaNext,
    Mute,
    MediaPlay,
    VolumeDown,
    VolumeUp,
    Insert,
    Home,
    PageUp,
    Delete,
    End,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    LeftAlt,
    F4,
    NumLock,
    A,
    C,
    D,
    S,
    V,
    X,
    Z,
}

impl Key {
    /// (QMK name, short diagram label, human description) for this key.
    const fn table(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Key::Kp0 => ("KC_KP_0", "0", "Keypad 0"),
            Key::Kp1 => ("KC_KP_1", "1", "Keypad 1"),
            Key::Kp2 => ("KC_KP_2", "2", "Keypad 2"),
            Key::Kp3 => ("KC_KP_3", "3", "Keypad 3"),
            Key::Kp4 => ("KC_KP_4", "4", "Keypad 4"),
            Key::Kp5 => ("KC_KP_5", "5", "Keypad 5"),
            Key::Kp6 => ("KC_KP_6", "6", "Keypad 6"),
            Key::Kp7 => ("KC_KP_7", "7", "Keypad 7"),
            Key::Kp8 => ("KC_KP_8", "8", "Keypad 8"),
            Key::Kp9 => ("KC_KP_9", "9", "Keypad 9"),
            Key::KpDot => ("KC_PDOT", ".", "Keypad decimal point"),
            Key::KpEnter => ("KC_PENT", "Ent", "Keypad Enter"),
            Key::MediaPrev => ("KC_MPRV", "MPrv", "Media previous track"),
            Key::MediaNext => ("KC_MNXT", "MNxt", "Media next track"),
            Key::Mute => ("KC_MUTE", "Mute", "Audio mute"),
            Key::MediaPlay => ("KC_MPLY", "MPly", "Media play/pause"),
            Key::VolumeDown => ("KC_VOLD", "Vol-", "Volume down"),
            Key::VolumeUp => ("KC_VOLU", "Vol+", "Volume up"),
            Key::Insert => ("KC_INS", "Ins", "Insert"),
            Key::Home => ("KC_HOME", "Home", "Home"),
            Key::PageUp => ("KC_PGUP", "PgUp", "Page up"),
            Key::Delete => ("KC_DEL", "Del", "Delete"),
            Key::End => ("KC_END", "End", "End"),
            Key::PageDown => ("KC_PGDN", "PgDn", "Page down"),
            Key::Up => ("KC_UP", "Up", "Cursor up"),
            Key::Down => ("KC_DOWN", "Down", "Cursor down"),
            Key::Left => ("KC_LEFT", "Left", "Cursor left"),
            Key::Right => ("KC_RGHT", "Rght", "Cursor right"),
            Key::LeftAlt => ("KC_LALT", "Alt", "Left Alt"),
            Key::F4 => ("KC_F4", "F4", "F4"),
            Key::NumLock => ("KC_NLCK", "NmLk", "Num Lock"),
            Key::A => ("KC_A", "A", "A"),
            Key::C => ("KC_C", "C", "C"),
            Key::D => ("KC_D", "D", "D"),
            Key::S => ("KC_S", "S", "S"),
            Key::V => ("KC_V", "V", "V"),
            Key::X => ("KC_X", "X", "X"),
            Key::Z => ("KC_Z", "Z", "Z"),
        }
    }

    /// QMK keycode name (e.g. `KC_KP_7`).
    #[must_use]
    pub const fn qmk_name(self) -> &'static str {
        self.table().0
    }

    /// Short label used in keyboard diagrams.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.table().1
    }

    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        self.table().2
    }

    /// Looks up a key by its QMK name.
    pub fn from_qmk_name(name: &str) -> Result<Self> {
        let key = match name {
            "KC_KP_0" => Key::Kp0,
            "KC_KP_1" => Key::Kp1,
            "KC_KP_2" => Key::Kp2,
            "KC_KP_3" => Key::Kp3,
            "KC_KP_4" => Key::Kp4,
            "KC_KP_5" => Key::Kp5,
            "KC_KP_6" => Key::Kp6,
            "KC_KP_7" => Key::Kp7,
            "KC_KP_8" => Key::Kp8,
            "KC_KP_9" => Key::Kp9,
            "KC_PDOT" => Key::KpDot,
            "KC_PENT" => Key::KpEnter,
            "KC_MPRV" => Key::MediaPrev,
            "KC_MNXT" => Key::MediaNext,
            "KC_MUTE" => Key::Mute,
            "KC_MPLY" => Key::MediaPlay,
            "KC_VOLD" => Key::VolumeDown,
            "KC_VOLU" => Key::VolumeUp,
            "KC_INS" => Key::Insert,
            "KC_HOME" => Key::Home,
            "KC_PGUP" => Key::PageUp,
            "KC_DEL" => Key::Delete,
            "KC_END" => Key::End,
            "KC_PGDN" => Key::PageDown,
            "KC_UP" => Key::Up,
            "KC_DOWN" => Key::Down,
            "KC_LEFT" => Key::Left,
            "KC_RGHT" => Key::Right,
            "KC_LALT" => Key::LeftAlt,
            "KC_F4" => Key::F4,
            "KC_NLCK" => Key::NumLock,
            "KC_A" => Key::A,
            "KC_C" => Key::C,
            "KC_D" => Key::D,
            "KC_S" => Key::S,
            "KC_V" => Key::V,
            "KC_X" => Key::X,
            "KC_Z" => Key::Z,
            other => bail!("Unknown keycode name: {other}"),
        };
        Ok(key)
    }
}

/// Modifier flags for chorded keycodes.
///
/// Rendered in QMK's nested wrapper syntax with Ctrl outermost, matching the
/// spelling the keymap uses (`LCTL(LGUI(KC_D))`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    /// Left Control
    pub ctrl: bool,
    /// Left GUI (Win/Cmd)
    pub gui: bool,
    /// Left Alt
    pub alt: bool,
    /// Left Shift
    pub shift: bool,
}

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        ctrl: false,
        gui: false,
        alt: false,
        shift: false,
    };

    /// Ctrl only.
    pub const CTRL: Self = Self {
        ctrl: true,
        gui: false,
        alt: false,
        shift: false,
    };

    /// Ctrl+GUI, the Windows virtual-desktop chord prefix.
    pub const CTRL_GUI: Self = Self {
        ctrl: true,
        gui: true,
        alt: false,
        shift: false,
    };

    /// Returns true when no modifier flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        !self.ctrl && !self.gui && !self.alt && !self.shift
    }

    /// Short label prefix for diagrams (e.g. `C-G-`).
    fn label_prefix(self) -> String {
        let mut prefix = String::new();
        if self.ctrl {
            prefix.push_str("C-");
        }
        if self.gui {
            prefix.push_str("G-");
        }
        if self.alt {
            prefix.push_str("A-");
        }
        if self.shift {
            prefix.push_str("S-");
        }
        prefix
    }

    /// Long name prefix for descriptions (e.g. `Ctrl+Gui+`).
    fn description_prefix(self) -> String {
        let mut prefix = String::new();
        if self.ctrl {
            prefix.push_str("Ctrl+");
        }
        if self.gui {
            prefix.push_str("Gui+");
        }
        if self.alt {
            prefix.push_str("Alt+");
        }
        if self.shift {
            prefix.push_str("Shift+");
        }
        prefix
    }
}

/// The two tap-dance-bound toggle keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapDanceKey {
    /// Toggles the Workspace overlay (single tap) or Macros overlay (double tap).
    Workspace,
    /// Toggles the Arrows overlay (single tap) or Macros overlay (double tap).
    Arrows,
}

impl TapDanceKey {
    /// All tap-dance keys the keymap defines.
    pub const ALL: [Self; 2] = [Self::Workspace, Self::Arrows];

    /// C identifier used in the generated firmware (`TD_WRKSPC`).
    #[must_use]
    pub const fn qmk_ident(self) -> &'static str {
        match self {
            Self::Workspace => "TD_WRKSPC",
            Self::Arrows => "TD_ARROWS",
        }
    }

    /// Lowercase name used in CLI output and simulation scripts.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Arrows => "arrows",
        }
    }

    /// Short label used in keyboard diagrams.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Workspace => "Wksp",
            Self::Arrows => "Arws",
        }
    }

    /// Looks up a tap-dance key by its lowercase name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "workspace" => Ok(Self::Workspace),
            "arrows" => Ok(Self::Arrows),
            other => bail!("Unknown tap dance key: {other} (expected 'workspace' or 'arrows')"),
        }
    }
}

impl fmt::Display for TapDanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifiers for the keymap's custom text macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroId {
    /// Types the literal string `"Boop. "`.
    Boop,
}

impl MacroId {
    /// All macros the keymap defines.
    pub const ALL: [Self; 1] = [Self::Boop];

    /// The literal text this macro emits.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Boop => "Boop. ",
        }
    }

    /// C identifier used in the generated firmware.
    #[must_use]
    pub const fn qmk_ident(self) -> &'static str {
        match self {
            Self::Boop => "BOOP",
        }
    }
}

/// A single keymap cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keycode {
    /// An unmodified key.
    Plain(Key),
    /// A key sent with modifiers held (e.g. Ctrl+Gui+D).
    Chord(Modifiers, Key),
    /// A tap-dance toggle, resolved by the tap-dance engine rather than
    /// reported directly.
    TapDance(TapDanceKey),
    /// A custom text macro handled by the interception hook.
    Macro(MacroId),
    /// Falls through to the next active layer below.
    Transparent,
    /// Dead cell; resolves to nothing.
    NoOp,
}

impl Keycode {
    /// Checks if this cell is transparent (passes through to lower layer).
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// Checks if this cell is a no-op.
    #[must_use]
    pub const fn is_no_op(self) -> bool {
        matches!(self, Self::NoOp)
    }

    /// Renders the QMK spelling of this keycode.
    #[must_use]
    pub fn qmk_syntax(self) -> String {
        match self {
            Self::Plain(key) => key.qmk_name().to_string(),
            Self::Chord(mods, key) => {
                let mut syntax = key.qmk_name().to_string();
                // Wrap inside-out so Ctrl ends up outermost.
                if mods.shift {
                    syntax = format!("LSFT({syntax})");
                }
                if mods.alt {
                    syntax = format!("LALT({syntax})");
                }
                if mods.gui {
                    syntax = format!("LGUI({syntax})");
                }
                if mods.ctrl {
                    syntax = format!("LCTL({syntax})");
                }
                syntax
            }
            Self::TapDance(td) => format!("TD({})", td.qmk_ident()),
            Self::Macro(id) => id.qmk_ident().to_string(),
            Self::Transparent => "KC_TRNS".to_string(),
            Self::NoOp => "KC_NO".to_string(),
        }
    }

    /// Short label for keyboard diagrams. Transparent and no-op cells render
    /// empty, as in hand-drawn QMK layer art.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Plain(key) => key.label().to_string(),
            Self::Chord(mods, key) => format!("{}{}", mods.label_prefix(), key.label()),
            Self::TapDance(td) => td.label().to_string(),
            Self::Macro(MacroId::Boop) => "Boop".to_string(),
            Self::Transparent | Self::NoOp => String::new(),
        }
    }

    /// Human-readable description for keycode listings.
    #[must_use]
    pub fn description(self) -> String {
        match self {
            Self::Plain(key) => key.description().to_string(),
            Self::Chord(mods, key) => format!("{}{}", mods.description_prefix(), key.description()),
            Self::TapDance(td) => format!("Tap dance: {} toggle", td.name()),
            Self::Macro(id) => format!("Types {:?}", id.text()),
            Self::Transparent => "Transparent (falls through to lower layer)".to_string(),
            Self::NoOp => "No operation".to_string(),
        }
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qmk_syntax())
    }
}

impl FromStr for Keycode {
    type Err = anyhow::Error;

    /// Parses a QMK keycode spelling, including nested modifier wrappers.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        match s {
            "KC_TRNS" | "KC_TRANSPARENT" => return Ok(Self::Transparent),
            "KC_NO" => return Ok(Self::NoOp),
            "BOOP" => return Ok(Self::Macro(MacroId::Boop)),
            "TD(TD_WRKSPC)" => return Ok(Self::TapDance(TapDanceKey::Workspace)),
            "TD(TD_ARROWS)" => return Ok(Self::TapDance(TapDanceKey::Arrows)),
            _ => {}
        }

        let wrapper = Regex::new(r"^(LCTL|LGUI|LALT|LSFT)\((.+)\)$").unwrap();
        if let Some(captures) = wrapper.captures(s) {
            let inner: Keycode = captures[2]
                .parse()
                .with_context(|| format!("Invalid chord syntax: {s}"))?;
            let (mut mods, key) = match inner {
                Self::Plain(key) => (Modifiers::NONE, key),
                Self::Chord(mods, key) => (mods, key),
                _ => bail!("Modifier wrapper applied to non-key code: {s}"),
            };
            match &captures[1] {
                "LCTL" => mods.ctrl = true,
                "LGUI" => mods.gui = true,
                "LALT" => mods.alt = true,
                _ => mods.shift = true,
            }
            return Ok(Self::Chord(mods, key));
        }

        Key::from_qmk_name(s).map(Self::Plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qmk_syntax_plain() {
        assert_eq!(Keycode::Plain(Key::Kp7).qmk_syntax(), "KC_KP_7");
        assert_eq!(Keycode::Transparent.qmk_syntax(), "KC_TRNS");
        assert_eq!(Keycode::NoOp.qmk_syntax(), "KC_NO");
    }

    #[test]
    fn test_qmk_syntax_chord_nesting() {
        let chord = Keycode::Chord(Modifiers::CTRL_GUI, Key::D);
        assert_eq!(chord.qmk_syntax(), "LCTL(LGUI(KC_D))");

        let copy = Keycode::Chord(Modifiers::CTRL, Key::C);
        assert_eq!(copy.qmk_syntax(), "LCTL(KC_C)");
    }

    #[test]
    fn test_qmk_syntax_tap_dance_and_macro() {
        assert_eq!(
            Keycode::TapDance(TapDanceKey::Workspace).qmk_syntax(),
            "TD(TD_WRKSPC)"
        );
        assert_eq!(Keycode::Macro(MacroId::Boop).qmk_syntax(), "BOOP");
    }

    #[test]
    fn test_parse_plain() {
        let code: Keycode = "KC_MUTE".parse().unwrap();
        assert_eq!(code, Keycode::Plain(Key::Mute));
    }

    #[test]
    fn test_parse_chord() {
        let code: Keycode = "LCTL(LGUI(KC_D))".parse().unwrap();
        assert_eq!(code, Keycode::Chord(Modifiers::CTRL_GUI, Key::D));

        let code: Keycode = "LCTL(KC_A)".parse().unwrap();
        assert_eq!(code, Keycode::Chord(Modifiers::CTRL, Key::A));
    }

    #[test]
    fn test_parse_specials() {
        assert_eq!("KC_TRNS".parse::<Keycode>().unwrap(), Keycode::Transparent);
        assert_eq!("KC_NO".parse::<Keycode>().unwrap(), Keycode::NoOp);
        assert_eq!(
            "TD(TD_ARROWS)".parse::<Keycode>().unwrap(),
            Keycode::TapDance(TapDanceKey::Arrows)
        );
        assert_eq!(
            "BOOP".parse::<Keycode>().unwrap(),
            Keycode::Macro(MacroId::Boop)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("KC_BOGUS".parse::<Keycode>().is_err());
        assert!("LCTL(BOOP)".parse::<Keycode>().is_err());
        assert!("".parse::<Keycode>().is_err());
    }

    #[test]
    fn test_parse_round_trip() {
        for syntax in [
            "KC_KP_7",
            "LCTL(LGUI(KC_F4))",
            "TD(TD_WRKSPC)",
            "BOOP",
            "KC_TRNS",
            "KC_NO",
        ] {
            let code: Keycode = syntax.parse().unwrap();
            assert_eq!(code.qmk_syntax(), syntax);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(Keycode::Plain(Key::Kp7).label(), "7");
        assert_eq!(Keycode::Chord(Modifiers::CTRL_GUI, Key::D).label(), "C-G-D");
        assert_eq!(Keycode::Transparent.label(), "");
        assert_eq!(Keycode::Macro(MacroId::Boop).label(), "Boop");
    }

    #[test]
    fn test_macro_text() {
        assert_eq!(MacroId::Boop.text(), "Boop. ");
    }
}
