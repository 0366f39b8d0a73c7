//! Markdown keymap reference generation.

use crate::export::atomic_write;
use crate::export::diagram::render_layer_diagram;
use crate::models::{Keymap, LayerId, MacroId, TapDanceKey};
use anyhow::Result;
use chrono::Utc;
use std::fmt::Write;
use std::path::Path;

/// Generates the full Markdown reference document for a keymap.
#[must_use]
pub fn generate_markdown(keymap: &Keymap) -> String {
    let mut output = String::new();

    writeln!(output, "# MP20 Keymap").unwrap();
    writeln!(output).unwrap();
    writeln!(
        output,
        "Generated by {} on {}.",
        crate::constants::APP_BINARY_NAME,
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    )
    .unwrap();
    writeln!(output).unwrap();

    for layer in LayerId::ALL {
        if layer.is_reserved() {
            continue;
        }
        writeln!(output, "## Layer {}: {}", layer.index(), layer.name()).unwrap();
        writeln!(output).unwrap();
        writeln!(output, "```text").unwrap();
        // Drop the diagram's own header line; the section heading covers it.
        for line in render_layer_diagram(keymap, layer).lines().skip(1) {
            writeln!(output, "{line}").unwrap();
        }
        writeln!(output, "```").unwrap();
        writeln!(output).unwrap();
    }

    output.push_str(&generate_tap_dance_section());
    output.push_str(&generate_macro_section());
    output
}

fn generate_tap_dance_section() -> String {
    let mut output = String::new();
    writeln!(output, "## Tap dances").unwrap();
    writeln!(output).unwrap();
    writeln!(output, "| Key | Single tap | Double tap |").unwrap();
    writeln!(output, "| --- | --- | --- |").unwrap();
    for td in TapDanceKey::ALL {
        let single = match td {
            TapDanceKey::Workspace => "Toggle Workspace overlay",
            TapDanceKey::Arrows => "Toggle Arrows overlay",
        };
        writeln!(output, "| {} | {} | Toggle Macros overlay |", td.name(), single).unwrap();
    }
    writeln!(output).unwrap();
    writeln!(
        output,
        "Selecting an overlay always deactivates the other two; at most one \
         overlay is active at a time."
    )
    .unwrap();
    writeln!(output).unwrap();
    output
}

fn generate_macro_section() -> String {
    let mut output = String::new();
    writeln!(output, "## Macros").unwrap();
    writeln!(output).unwrap();
    for id in MacroId::ALL {
        writeln!(output, "- `{}`: types {:?}", id.qmk_ident(), id.text()).unwrap();
    }
    output
}

/// Writes the Markdown reference to `path` atomically.
pub fn save_markdown(keymap: &Keymap, path: &Path) -> Result<()> {
    let markdown = generate_markdown(keymap);
    atomic_write(path, &markdown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_document_sections() {
        let keymap = Keymap::mp20_default();
        let doc = generate_markdown(&keymap);

        assert!(doc.starts_with("# MP20 Keymap"));
        assert!(doc.contains("## Layer 0: Numpad"));
        assert!(doc.contains("## Layer 3: Macros"));
        assert!(!doc.contains("## Layer 4"));
        assert!(doc.contains("## Tap dances"));
        assert!(doc.contains("| workspace | Toggle Workspace overlay |"));
        assert!(doc.contains("## Macros"));
        assert!(doc.contains("\"Boop. \""));
    }

    #[test]
    fn test_save_markdown_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keymap.md");
        save_markdown(&Keymap::mp20_default(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# MP20 Keymap"));
    }
}
