//! Tap-dance gestures and the simulator-side tap counter.
//!
//! On hardware the firmware's tap-dance engine counts consecutive taps within
//! the tapping term and calls the finished-gesture handler with the final
//! count. [`TapDanceCounter`] reproduces that contract on a virtual clock so
//! the keymap can be exercised off-hardware; it is not a reimplementation of
//! the production engine.

use crate::models::TapDanceKey;
use std::fmt;

/// A resolved tap-dance interaction: which bound key, how many taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    /// The tap-dance-bound key.
    pub key: TapDanceKey,
    /// Number of consecutive taps counted before the gesture resolved.
    pub taps: u8,
}

impl Gesture {
    /// Creates a gesture.
    #[must_use]
    pub const fn new(key: TapDanceKey, taps: u8) -> Self {
        Self { key, taps }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{}", self.key, self.taps)
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    key: TapDanceKey,
    taps: u8,
    deadline_ms: u64,
}

/// Counts consecutive taps of the tap-dance keys on a virtual clock.
///
/// A pending dance resolves when its tapping term expires ([`tick`]), when a
/// different key interrupts it ([`interrupt`]), when the other dance key is
/// pressed, or when input ends ([`flush`]).
///
/// [`tick`]: TapDanceCounter::tick
/// [`interrupt`]: TapDanceCounter::interrupt
/// [`flush`]: TapDanceCounter::flush
#[derive(Debug)]
pub struct TapDanceCounter {
    tapping_term_ms: u64,
    pending: Option<Pending>,
}

impl TapDanceCounter {
    /// Creates a counter with the given tapping term.
    #[must_use]
    pub const fn new(tapping_term_ms: u64) -> Self {
        Self {
            tapping_term_ms,
            pending: None,
        }
    }

    /// The configured tapping term in milliseconds.
    #[must_use]
    pub const fn tapping_term_ms(&self) -> u64 {
        self.tapping_term_ms
    }

    /// Whether a dance is currently pending.
    #[must_use]
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a press of a tap-dance key at `now_ms`.
    ///
    /// Returns the gesture that resolved as a consequence: a pending dance on
    /// the other key, or a pending dance on the same key whose term had
    /// already lapsed.
    pub fn press(&mut self, key: TapDanceKey, now_ms: u64) -> Option<Gesture> {
        let extends =
            matches!(&self.pending, Some(p) if p.key == key && now_ms < p.deadline_ms);

        if extends {
            if let Some(pending) = &mut self.pending {
                pending.taps = pending.taps.saturating_add(1);
                pending.deadline_ms = now_ms + self.tapping_term_ms;
            }
            return None;
        }

        let resolved = self.take_pending();
        self.pending = Some(Pending {
            key,
            taps: 1,
            deadline_ms: now_ms + self.tapping_term_ms,
        });
        resolved
    }

    /// Advances the clock, resolving the pending dance if its term expired.
    pub fn tick(&mut self, now_ms: u64) -> Option<Gesture> {
        let expired = matches!(&self.pending, Some(p) if now_ms >= p.deadline_ms);
        if expired {
            self.take_pending()
        } else {
            None
        }
    }

    /// A non-dance key was pressed: the pending dance resolves immediately.
    pub fn interrupt(&mut self) -> Option<Gesture> {
        self.take_pending()
    }

    /// Resolves whatever is still pending (end of input).
    pub fn flush(&mut self) -> Option<Gesture> {
        self.take_pending()
    }

    fn take_pending(&mut self) -> Option<Gesture> {
        self.pending.take().map(|p| Gesture::new(p.key, p.taps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TERM: u64 = 200;

    #[test]
    fn test_single_tap_resolves_on_timeout() {
        let mut counter = TapDanceCounter::new(TERM);
        assert_eq!(counter.press(TapDanceKey::Workspace, 0), None);
        assert_eq!(counter.tick(100), None);
        assert_eq!(
            counter.tick(200),
            Some(Gesture::new(TapDanceKey::Workspace, 1))
        );
        assert!(!counter.has_pending());
    }

    #[test]
    fn test_double_tap_within_term() {
        let mut counter = TapDanceCounter::new(TERM);
        counter.press(TapDanceKey::Arrows, 0);
        assert_eq!(counter.press(TapDanceKey::Arrows, 150), None);
        assert_eq!(counter.tick(350), Some(Gesture::new(TapDanceKey::Arrows, 2)));
    }

    #[test]
    fn test_taps_past_term_are_separate_gestures() {
        let mut counter = TapDanceCounter::new(TERM);
        counter.press(TapDanceKey::Workspace, 0);
        // Second press after the term lapsed: first dance resolves as a single.
        assert_eq!(
            counter.press(TapDanceKey::Workspace, 300),
            Some(Gesture::new(TapDanceKey::Workspace, 1))
        );
        assert_eq!(
            counter.tick(500),
            Some(Gesture::new(TapDanceKey::Workspace, 1))
        );
    }

    #[test]
    fn test_other_dance_key_resolves_pending() {
        let mut counter = TapDanceCounter::new(TERM);
        counter.press(TapDanceKey::Workspace, 0);
        assert_eq!(
            counter.press(TapDanceKey::Arrows, 100),
            Some(Gesture::new(TapDanceKey::Workspace, 1))
        );
        assert!(counter.has_pending());
    }

    #[test]
    fn test_interrupt_and_flush() {
        let mut counter = TapDanceCounter::new(TERM);
        counter.press(TapDanceKey::Arrows, 0);
        counter.press(TapDanceKey::Arrows, 50);
        assert_eq!(
            counter.interrupt(),
            Some(Gesture::new(TapDanceKey::Arrows, 2))
        );
        assert_eq!(counter.flush(), None);
    }
}
