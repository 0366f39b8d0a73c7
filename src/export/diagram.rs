//! Keyboard visual renderer.
//!
//! Generates ASCII/Unicode layer diagrams using box-drawing characters, in
//! the style of hand-drawn QMK keymap art.

use crate::models::{Keymap, LayerId, MATRIX_COLS};
use std::fmt::Write;

/// Interior width of one key cell.
const CELL_WIDTH: usize = 8;

/// Renders a single layer as a box-drawing keyboard diagram.
///
/// # Example
///
/// ```text
/// Layer 0: Numpad
/// ┌────────┬────────┬────────┬────────┬────────┐
/// │   7    │   8    │   9    │  Wksp  │  Arws  │
/// ├────────┼────────┼────────┼────────┼────────┤
/// ...
/// ```
#[must_use]
pub fn render_layer_diagram(keymap: &Keymap, layer: LayerId) -> String {
    let mut output = String::new();
    writeln!(output, "Layer {}: {}", layer.index(), layer.name()).unwrap();

    let grid = keymap.grid(layer);
    output.push_str(&border_row('┌', '┬', '┐'));
    let mut first = true;
    for cols in grid.rows() {
        if !first {
            output.push_str(&border_row('├', '┼', '┤'));
        }
        first = false;

        output.push('│');
        for code in cols {
            output.push_str(&centered(&code.label(), CELL_WIDTH));
            output.push('│');
        }
        output.push('\n');
    }
    output.push_str(&border_row('└', '┴', '┘'));
    output
}

/// Renders every non-reserved layer, separated by blank lines.
#[must_use]
pub fn render_all_layers(keymap: &Keymap) -> String {
    let mut output = String::new();
    for layer in LayerId::ALL {
        if layer.is_reserved() {
            continue;
        }
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&render_layer_diagram(keymap, layer));
    }
    output
}

fn border_row(left: char, mid: char, right: char) -> String {
    let segment = "─".repeat(CELL_WIDTH);
    let mut row = String::new();
    row.push(left);
    for col in 0..MATRIX_COLS {
        if col > 0 {
            row.push(mid);
        }
        row.push_str(&segment);
    }
    row.push(right);
    row.push('\n');
    row
}

/// Centers `text` in a field of `width` characters, truncating if needed.
fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }
    let pad = width - len;
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered() {
        assert_eq!(centered("7", 8), "   7    ");
        assert_eq!(centered("Vol-", 8), "  Vol-  ");
        assert_eq!(centered("", 8), "        ");
        assert_eq!(centered("LONGLABEL!", 8), "LONGLABE");
    }

    #[test]
    fn test_layer_diagram_shape() {
        let keymap = Keymap::mp20_default();
        let diagram = render_layer_diagram(&keymap, LayerId::Numpad);

        assert!(diagram.starts_with("Layer 0: Numpad\n"));
        // Header + 4 key rows + 5 borders
        assert_eq!(diagram.lines().count(), 10);
        assert!(diagram.contains("Wksp"));
        assert!(diagram.contains("Vol+"));
    }

    #[test]
    fn test_all_layers_skips_reserved() {
        let keymap = Keymap::mp20_default();
        let output = render_all_layers(&keymap);
        assert!(output.contains("Layer 0: Numpad"));
        assert!(output.contains("Layer 3: Macros"));
        assert!(!output.contains("Modifier"));
    }
}
