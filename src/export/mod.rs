//! Export functionality for the keymap.
//!
//! Generates visual layer diagrams and a Markdown reference document with
//! tap-dance and macro documentation.

pub mod diagram;
pub mod markdown;

pub use diagram::{render_all_layers, render_layer_diagram};
pub use markdown::{generate_markdown, save_markdown};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes a file atomically via a temp file + rename, so a failed write
/// never leaves a truncated document behind.
pub(crate) fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write temporary file: {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path)
        .with_context(|| format!("Failed to rename into place: {}", path.display()))?;
    Ok(())
}
