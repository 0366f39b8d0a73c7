//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Some fixtures reserved for future tests

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Writes a simulation script to a temp file.
///
/// # Returns
/// The script path and the temp dir guard keeping it alive.
pub fn write_temp_script(content: &str) -> (PathBuf, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("script.txt");
    fs::write(&path, content).expect("Failed to write script");
    (path, dir)
}

/// A script that activates the Arrows overlay, switches to Macros via a
/// double tap, and fires one macro key.
pub fn overlay_tour_script() -> &'static str {
    "# activate arrows\n\
     tap 0 4\n\
     wait 250\n\
     # double tap workspace: converges on macros\n\
     tap 0 3\n\
     tap 0 3\n\
     wait 250\n\
     # fire a macro key\n\
     tap 1 1\n"
}
