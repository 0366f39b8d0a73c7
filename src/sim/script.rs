//! Line-oriented simulation script parsing.
//!
//! Scripts drive the simulator one event per line:
//!
//! ```text
//! # toggle the Arrows overlay, then navigate
//! tap 0 4
//! wait 250
//! tap 3 1          # Down
//! dance workspace 2
//! ```
//!
//! Events: `press ROW COL`, `release ROW COL`, `tap ROW COL`,
//! `wait MILLISECONDS`, `dance KEY COUNT`. Everything after `#` is a comment.

use crate::models::{TapDanceKey, MATRIX_COLS, MATRIX_ROWS};
use anyhow::{bail, Context, Result};

/// One parsed script event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptEvent {
    /// Press the key at a matrix position.
    Press {
        /// Matrix row.
        row: usize,
        /// Matrix column.
        col: usize,
    },
    /// Release the key at a matrix position.
    Release {
        /// Matrix row.
        row: usize,
        /// Matrix column.
        col: usize,
    },
    /// Press and immediately release.
    Tap {
        /// Matrix row.
        row: usize,
        /// Matrix column.
        col: usize,
    },
    /// Advance the virtual clock.
    Wait {
        /// Milliseconds to advance.
        ms: u64,
    },
    /// Inject an already-resolved gesture, bypassing the tap counter.
    Dance {
        /// The tap-dance key.
        key: TapDanceKey,
        /// Tap count.
        taps: u8,
    },
}

/// Parses a full script, one event per non-empty line.
pub fn parse_script(input: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let event = parse_line(line)
            .with_context(|| format!("line {line_no}: {}", raw_line.trim()))?;
        events.push(event);
    }
    Ok(events)
}

fn parse_line(line: &str) -> Result<ScriptEvent> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["press", row, col] => {
            let (row, col) = parse_position(row, col)?;
            Ok(ScriptEvent::Press { row, col })
        }
        ["release", row, col] => {
            let (row, col) = parse_position(row, col)?;
            Ok(ScriptEvent::Release { row, col })
        }
        ["tap", row, col] => {
            let (row, col) = parse_position(row, col)?;
            Ok(ScriptEvent::Tap { row, col })
        }
        ["wait", ms] => {
            let ms: u64 = ms.parse().context("Invalid wait duration")?;
            Ok(ScriptEvent::Wait { ms })
        }
        ["dance", key, taps] => {
            let key = TapDanceKey::from_name(key)?;
            let taps: u8 = taps.parse().context("Invalid tap count")?;
            Ok(ScriptEvent::Dance { key, taps })
        }
        _ => bail!(
            "Malformed event '{line}' (expected: press R C, release R C, tap R C, wait MS, \
             or dance KEY N)"
        ),
    }
}

fn parse_position(row: &str, col: &str) -> Result<(usize, usize)> {
    let row: usize = row.parse().context("Invalid row")?;
    let col: usize = col.parse().context("Invalid column")?;
    if row >= MATRIX_ROWS || col >= MATRIX_COLS {
        bail!("Position ({row}, {col}) is outside the {MATRIX_ROWS}x{MATRIX_COLS} matrix");
    }
    Ok((row, col))
}
