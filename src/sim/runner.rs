//! Drives the keymap runtime through a parsed script on a virtual clock.

use crate::engine::{Gesture, KeyEvent, KeymapRuntime, TapDanceCounter};
use crate::models::Keycode;
use crate::sim::script::ScriptEvent;
use serde::Serialize;

/// One step of a simulation transcript.
#[derive(Debug, Clone, Serialize)]
pub struct TraceEntry {
    /// Virtual time when the step ran.
    pub at_ms: u64,
    /// Human description of the input.
    pub input: String,
    /// QMK spelling of the keycode the position resolved to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved: Option<String>,
    /// Gesture that resolved at this step, e.g. `workspace x2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gesture: Option<String>,
    /// Text the interception hook emitted at this step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emitted: Option<String>,
    /// Active layers after the step, lowest first.
    pub layers: Vec<String>,
}

/// The result of a simulation run.
#[derive(Debug, Serialize)]
pub struct SimReport {
    /// Tapping term the run used.
    pub tapping_term_ms: u64,
    /// Per-step transcript.
    pub steps: Vec<TraceEntry>,
    /// Active layers at the end of the run.
    pub final_layers: Vec<String>,
    /// All text emitted during the run, in order.
    pub emitted_text: Vec<String>,
}

/// Plays scripted events against a [`KeymapRuntime`], standing in for the
/// host firmware's dispatcher and tap-dance engine.
#[derive(Debug)]
pub struct Simulator {
    runtime: KeymapRuntime,
    counter: TapDanceCounter,
    clock_ms: u64,
    steps: Vec<TraceEntry>,
    emitted: Vec<String>,
}

impl Simulator {
    /// Creates a simulator over the MP20 default keymap.
    #[must_use]
    pub fn new(tapping_term_ms: u64) -> Self {
        Self {
            runtime: KeymapRuntime::mp20(),
            counter: TapDanceCounter::new(tapping_term_ms),
            clock_ms: 0,
            steps: Vec::new(),
            emitted: Vec::new(),
        }
    }

    /// Runs a script to completion and returns the transcript. A dance still
    /// pending when the script ends is resolved as the final step.
    #[must_use]
    pub fn run(mut self, events: &[ScriptEvent]) -> SimReport {
        for event in events {
            self.step(*event);
        }
        if let Some(gesture) = self.counter.flush() {
            self.apply_gesture(gesture, "end of script");
        }

        let final_layers = self.runtime.layer_state().names();
        SimReport {
            tapping_term_ms: self.counter.tapping_term_ms(),
            steps: self.steps,
            final_layers,
            emitted_text: self.emitted,
        }
    }

    fn step(&mut self, event: ScriptEvent) {
        match event {
            ScriptEvent::Press { row, col } => self.handle_press(row, col),
            ScriptEvent::Release { row, col } => self.handle_release(row, col),
            ScriptEvent::Tap { row, col } => {
                self.handle_press(row, col);
                self.handle_release(row, col);
            }
            ScriptEvent::Wait { ms } => {
                self.clock_ms += ms;
                self.record(format!("wait {ms}ms"), None, None);
                if let Some(gesture) = self.counter.tick(self.clock_ms) {
                    self.apply_gesture(gesture, "tapping term expired");
                }
            }
            ScriptEvent::Dance { key, taps } => {
                if let Some(pending) = self.counter.flush() {
                    self.apply_gesture(pending, "flushed before injected gesture");
                }
                self.apply_gesture(Gesture::new(key, taps), "injected");
            }
        }
    }

    fn handle_press(&mut self, row: usize, col: usize) {
        // The toggle keys stay reachable on every layer, so resolving before
        // any pending dance flushes cannot misclassify a tap-dance press.
        if let Some(Keycode::TapDance(td)) = self.runtime.resolve(row, col) {
            if let Some(gesture) = self.counter.press(td, self.clock_ms) {
                self.apply_gesture(gesture, "resolved by next dance press");
            }
            self.record(
                format!("press ({row}, {col})"),
                Some(Keycode::TapDance(td).qmk_syntax()),
                None,
            );
            return;
        }

        // Any other press interrupts a pending dance before it is handled.
        if let Some(gesture) = self.counter.interrupt() {
            self.apply_gesture(gesture, "interrupted by key press");
        }

        let resolved = self.runtime.resolve(row, col);
        let mut sink: Vec<String> = Vec::new();
        if let Some(code) = resolved {
            self.runtime.on_key_event(KeyEvent::press(code), &mut sink);
        }
        let emitted = sink.into_iter().next();
        if let Some(text) = &emitted {
            self.emitted.push(text.clone());
        }
        self.record(
            format!("press ({row}, {col})"),
            resolved.map(Keycode::qmk_syntax),
            emitted,
        );
    }

    fn handle_release(&mut self, row: usize, col: usize) {
        let resolved = self.runtime.resolve(row, col);
        let mut sink: Vec<String> = Vec::new();
        if let Some(code) = resolved {
            if !matches!(code, Keycode::TapDance(_)) {
                self.runtime
                    .on_key_event(KeyEvent::release(code), &mut sink);
            }
        }
        // Releases never emit; the sink stays empty.
        debug_assert!(sink.is_empty());
        self.record(
            format!("release ({row}, {col})"),
            resolved.map(Keycode::qmk_syntax),
            None,
        );
    }

    fn apply_gesture(&mut self, gesture: Gesture, why: &str) {
        self.runtime.on_gesture(gesture);
        let entry = TraceEntry {
            at_ms: self.clock_ms,
            input: format!("tap dance resolved ({why})"),
            resolved: None,
            gesture: Some(gesture.to_string()),
            emitted: None,
            layers: self.runtime.layer_state().names(),
        };
        self.steps.push(entry);
    }

    fn record(&mut self, input: String, resolved: Option<String>, emitted: Option<String>) {
        self.steps.push(TraceEntry {
            at_ms: self.clock_ms,
            input,
            resolved,
            gesture: None,
            emitted,
            layers: self.runtime.layer_state().names(),
        });
    }
}
