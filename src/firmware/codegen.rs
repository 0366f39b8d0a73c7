//! QMK keymap.c generation.
//!
//! Emits the C source equivalent of the compiled-in keymap: layer and
//! keycode enums, the keymaps array, the tap-dance callbacks (generated from
//! the same transition table the runtime executes), and
//! `process_record_user`.

use crate::engine::{gesture_effects, LayerOp};
use crate::models::{Keymap, LayerId, MacroId, TapDanceKey};
use anyhow::{Context, Result};
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// Generates the complete keymap.c source.
#[must_use]
pub fn generate_keymap_c(keymap: &Keymap) -> String {
    let mut output = String::new();

    output.push_str("#include QMK_KEYBOARD_H\n\n");
    output.push_str(&generate_layer_enum());
    output.push_str(&generate_keycode_enum());
    output.push_str(&generate_keymaps_array(keymap));
    output.push_str(&generate_dance_callbacks());
    output.push_str(&generate_tap_dance_actions());
    output.push_str(&generate_process_record());
    output
}

/// Writes keymap.c into `dir`, creating the directory if needed.
pub fn write_keymap_c(keymap: &Keymap, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    let path = dir.join("keymap.c");
    fs::write(&path, generate_keymap_c(keymap))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

fn generate_layer_enum() -> String {
    let mut output = String::from("// Layers\nenum MP20_layers {\n");
    for (idx, layer) in LayerId::ALL.iter().enumerate() {
        let suffix = if idx == 0 { " = 0" } else { "" };
        let comma = if idx + 1 < LayerId::ALL.len() { "," } else { "" };
        writeln!(output, "  {}{suffix}{comma}", layer.qmk_ident()).unwrap();
    }
    output.push_str("};\n\n");
    output
}

fn generate_keycode_enum() -> String {
    let mut output = String::from("// Custom keycodes\nenum MP20_keycodes {\n");
    let mut idents: Vec<&str> = TapDanceKey::ALL.iter().map(|td| td.qmk_ident()).collect();
    idents.extend(MacroId::ALL.iter().map(|id| id.qmk_ident()));
    for (idx, ident) in idents.iter().enumerate() {
        let comma = if idx + 1 < idents.len() { "," } else { "" };
        writeln!(output, "  {ident}{comma}").unwrap();
    }
    output.push_str("};\n\n");
    output
}

fn generate_keymaps_array(keymap: &Keymap) -> String {
    let mut output =
        String::from("const uint16_t PROGMEM keymaps[][MATRIX_ROWS][MATRIX_COLS] = {\n\n");

    let layers: Vec<LayerId> = LayerId::ALL
        .into_iter()
        .filter(|layer| !layer.is_reserved())
        .collect();

    for (layer_idx, layer) in layers.iter().enumerate() {
        let grid = keymap.grid(*layer);

        // Pad cells per layer so the grid reads as a grid.
        let width = grid
            .rows()
            .flat_map(|cols| cols.iter())
            .map(|code| code.qmk_syntax().len())
            .max()
            .unwrap_or(0);

        writeln!(output, "[{}] = {{", layer.qmk_ident()).unwrap();
        let row_count = grid.rows().count();
        for (row_idx, cols) in grid.rows().enumerate() {
            let cells: Vec<String> = cols
                .iter()
                .map(|code| format!("{:<width$}", code.qmk_syntax()))
                .collect();
            let comma = if row_idx + 1 < row_count { "," } else { "" };
            writeln!(output, "  {{{}}}{comma}", cells.join(", ").trim_end()).unwrap();
        }
        let comma = if layer_idx + 1 < layers.len() { "," } else { "" };
        writeln!(output, "}}{comma}\n").unwrap();
    }

    output.push_str("};\n\n");
    output
}

fn dance_callback_name(td: TapDanceKey) -> &'static str {
    match td {
        TapDanceKey::Workspace => "dance_wrkspc_finished",
        TapDanceKey::Arrows => "dance_arrows_finished",
    }
}

fn generate_dance_callbacks() -> String {
    let mut output = String::new();
    for td in TapDanceKey::ALL {
        writeln!(
            output,
            "void {}(qk_tap_dance_state_t *state, void *user_data) {{",
            dance_callback_name(td)
        )
        .unwrap();
        for (idx, taps) in [1u8, 2].iter().enumerate() {
            let keyword = if idx == 0 { "if" } else { "} else if" };
            writeln!(output, "  {keyword} (state->count == {taps}) {{").unwrap();
            for effect in gesture_effects(td, *taps) {
                let call = match effect.op {
                    LayerOp::Invert => "layer_invert",
                    LayerOp::Off => "layer_off",
                };
                writeln!(output, "    {call}({});", effect.layer.qmk_ident()).unwrap();
            }
        }
        output.push_str("  }\n}\n\n");
    }
    output
}

fn generate_tap_dance_actions() -> String {
    let mut output = String::from("qk_tap_dance_action_t tap_dance_actions[] = {\n");
    let count = TapDanceKey::ALL.len();
    for (idx, td) in TapDanceKey::ALL.iter().enumerate() {
        let comma = if idx + 1 < count { "," } else { "" };
        writeln!(
            output,
            "  [{}] = ACTION_TAP_DANCE_FN_ADVANCED(NULL, {}, NULL){comma}",
            td.qmk_ident(),
            dance_callback_name(*td)
        )
        .unwrap();
    }
    output.push_str("};\n\n");
    output
}

fn generate_process_record() -> String {
    let mut output = String::new();
    output.push_str("bool process_record_user(uint16_t keycode, keyrecord_t *record) {\n");
    output.push_str("  if (record->event.pressed) {\n");
    output.push_str("    switch (keycode) {\n");
    for id in MacroId::ALL {
        writeln!(output, "      case {}:", id.qmk_ident()).unwrap();
        writeln!(output, "        SEND_STRING(\"{}\");", c_escape(id.text())).unwrap();
        output.push_str("        return false;\n");
    }
    output.push_str("    }\n  }\n  return true;\n}\n");
    output
}

fn c_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_source_shape() {
        let source = generate_keymap_c(&Keymap::mp20_default());

        assert!(source.starts_with("#include QMK_KEYBOARD_H"));
        assert!(source.contains("_NUMPAD = 0,"));
        assert!(source.contains("[_WRKSPC] = {"));
        assert!(source.contains("LCTL(LGUI(KC_D))"));
        assert!(source.contains("TD(TD_WRKSPC)"));
        // The reserved layer gets an enum entry but no grid.
        assert!(source.contains("_MOD\n"));
        assert!(!source.contains("[_MOD] = {"));
    }

    #[test]
    fn test_dance_callbacks_mirror_runtime_table() {
        let source = generate_keymap_c(&Keymap::mp20_default());

        assert!(source.contains("void dance_wrkspc_finished(qk_tap_dance_state_t *state"));
        assert!(source.contains("layer_invert(_WRKSPC);"));
        assert!(source.contains("} else if (state->count == 2) {"));
        assert!(source.contains("layer_invert(_MACROS);"));
        assert!(source
            .contains("[TD_ARROWS] = ACTION_TAP_DANCE_FN_ADVANCED(NULL, dance_arrows_finished, NULL)"));
    }

    #[test]
    fn test_process_record_emits_macro() {
        let source = generate_keymap_c(&Keymap::mp20_default());
        assert!(source.contains("case BOOP:"));
        assert!(source.contains("SEND_STRING(\"Boop. \");"));
        assert!(source.contains("return true;"));
    }

    #[test]
    fn test_c_escape() {
        assert_eq!(c_escape("Boop. "), "Boop. ");
        assert_eq!(c_escape("say \"hi\""), "say \\\"hi\\\"");
    }

    #[test]
    fn test_write_keymap_c() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_keymap_c(&Keymap::mp20_default(), dir.path()).unwrap();
        assert!(path.ends_with("keymap.c"));
        let content = std::fs::read_to_string(path).unwrap();
        assert!(content.contains("process_record_user"));
    }
}
