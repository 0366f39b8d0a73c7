//! Keymap validation before firmware generation.
//!
//! Checks the properties the generated firmware relies on but the type
//! system cannot enforce, chiefly that the tap-dance toggles stay reachable
//! while an overlay is active.

use crate::models::{Keymap, LayerId};
use serde::Serialize;
use std::fmt;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Critical errors that prevent firmware generation
    pub errors: Vec<ValidationError>,
    /// Non-critical warnings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Kinds of keymap validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// An overlay layer covers a tap-dance toggle position with a
    /// non-transparent keycode, making the toggle unreachable while that
    /// overlay is active.
    ShadowedToggle,
    /// A tap-dance key is missing from the base layer.
    UnboundTapDance,
    /// A tap-dance key appears more than once on the base layer.
    DuplicateTapDance,
}

/// Validation error with position context.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Layer where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<String>,
    /// Matrix position where the error occurred
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<(usize, usize)>,
    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Non-critical validation warning.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationWarning {
    /// Human-readable warning message
    pub message: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a keymap against the invariants the runtime depends on.
pub struct KeymapValidator<'a> {
    keymap: &'a Keymap,
}

impl<'a> KeymapValidator<'a> {
    /// Creates a validator for a keymap.
    #[must_use]
    pub const fn new(keymap: &'a Keymap) -> Self {
        Self { keymap }
    }

    /// Runs all checks and returns the report.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        self.check_tap_dance_bindings(&mut report);
        self.check_toggle_reachability(&mut report);
        self.check_base_transparency(&mut report);
        self.check_reserved_layer(&mut report);
        report
    }

    /// Each tap-dance key must appear exactly once on the base layer.
    fn check_tap_dance_bindings(&self, report: &mut ValidationReport) {
        use crate::models::TapDanceKey;

        let positions = self.keymap.tap_dance_positions();
        for td in TapDanceKey::ALL {
            let count = positions.iter().filter(|(key, _, _)| *key == td).count();
            if count == 0 {
                report.errors.push(ValidationError {
                    kind: ValidationErrorKind::UnboundTapDance,
                    layer: Some(LayerId::Numpad.name().to_string()),
                    position: None,
                    message: format!("Tap dance '{td}' is not bound on the base layer"),
                });
            } else if count > 1 {
                report.errors.push(ValidationError {
                    kind: ValidationErrorKind::DuplicateTapDance,
                    layer: Some(LayerId::Numpad.name().to_string()),
                    position: None,
                    message: format!("Tap dance '{td}' is bound {count} times on the base layer"),
                });
            }
        }
    }

    /// Overlay layers must keep the toggle positions transparent; otherwise
    /// an active overlay shadows its own exit toggle.
    fn check_toggle_reachability(&self, report: &mut ValidationReport) {
        for (td, row, col) in self.keymap.tap_dance_positions() {
            for layer in LayerId::ALL {
                if !layer.is_overlay() {
                    continue;
                }
                let Some(code) = self.keymap.grid(layer).key_at(row, col) else {
                    continue;
                };
                if !code.is_transparent() {
                    report.errors.push(ValidationError {
                        kind: ValidationErrorKind::ShadowedToggle,
                        layer: Some(layer.name().to_string()),
                        position: Some((row, col)),
                        message: format!(
                            "{layer} shadows the '{td}' toggle at ({row}, {col}) with {}",
                            code.qmk_syntax()
                        ),
                    });
                }
            }
        }
    }

    /// Transparent cells on the base layer fall through to nothing.
    fn check_base_transparency(&self, report: &mut ValidationReport) {
        let base = self.keymap.grid(LayerId::Numpad);
        for (row, cols) in base.rows().enumerate() {
            for (col, code) in cols.iter().enumerate() {
                if code.is_transparent() {
                    report.warnings.push(ValidationWarning {
                        message: format!(
                            "Base layer cell ({row}, {col}) is transparent and resolves to nothing"
                        ),
                    });
                }
            }
        }
    }

    /// The reserved layer should stay pass-through.
    fn check_reserved_layer(&self, report: &mut ValidationReport) {
        let reserved = self.keymap.grid(LayerId::Modifier);
        let bound = reserved
            .rows()
            .flat_map(|cols| cols.iter())
            .filter(|code| !code.is_transparent())
            .count();
        if bound > 0 {
            report.warnings.push(ValidationWarning {
                message: format!(
                    "Reserved layer {} carries {bound} binding(s); expected all-transparent",
                    LayerId::Modifier
                ),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Keymap;

    #[test]
    fn test_default_keymap_is_valid() {
        let keymap = Keymap::mp20_default();
        let report = KeymapValidator::new(&keymap).validate();
        assert!(report.is_valid(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty(), "warnings: {:?}", report.warnings);
    }

    #[test]
    fn test_empty_report_is_valid() {
        assert!(ValidationReport::new().is_valid());
    }
}
