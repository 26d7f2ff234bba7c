//! Guess debouncing.
//!
//! A cube's sensor re-reports its neighbor many times per second while
//! the rack sits still. Without a gate, every resolution matching the
//! prior stable arrangement would re-fire scoring and display side
//! effects. The debouncer suppresses a repeat of the last announced
//! candidate set inside a cooldown window, and the window slides: a
//! continuously repeated signal keeps extending the suppression rather
//! than firing once per window.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::Word;

/// Reference cooldown window.
pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_secs(10);

/// Timed gate over candidate announcements.
///
/// Single-writer state: update it atomically with the resolver call
/// whose output it gates, so two resolutions can never both read the
/// same stale candidate set.
#[derive(Debug, Clone)]
pub struct GuessDebouncer {
    window: Duration,
    last_candidates: Vec<Word>,
    last_time: Option<Instant>,
}

impl GuessDebouncer {
    /// Create a debouncer with the given cooldown window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_candidates: Vec::new(),
            last_time: None,
        }
    }

    /// The configured cooldown window.
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Decide whether `candidates` should be announced at `now`.
    ///
    /// Takes the timestamp as an argument rather than sampling the
    /// clock, so the decision is testable and the caller controls the
    /// time base.
    pub fn should_announce(&mut self, candidates: &[Word], now: Instant) -> bool {
        if candidates == self.last_candidates.as_slice() {
            if let Some(last) = self.last_time {
                if now.duration_since(last) < self.window {
                    debug!(?candidates, "suppressing repeated guess");
                    self.last_time = Some(now);
                    return false;
                }
            }
        }
        self.last_candidates = candidates.to_vec();
        self.last_time = Some(now);
        true
    }
}

impl Default for GuessDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexicube_registry::TileSlot;

    fn word(slots: &[u8]) -> Word {
        Word::new(slots.iter().map(|&s| TileSlot::new(s)).collect())
    }

    #[test]
    fn first_guess_is_announced() {
        let mut debouncer = GuessDebouncer::default();
        assert!(debouncer.should_announce(&[word(&[0, 1])], Instant::now()));
    }

    #[test]
    fn identical_guess_inside_window_is_suppressed() {
        let mut debouncer = GuessDebouncer::default();
        let t0 = Instant::now();

        assert!(debouncer.should_announce(&[word(&[0, 1])], t0));
        assert!(!debouncer.should_announce(&[word(&[0, 1])], t0 + Duration::from_secs(3)));
    }

    #[test]
    fn changed_guess_is_announced_immediately() {
        let mut debouncer = GuessDebouncer::default();
        let t0 = Instant::now();

        assert!(debouncer.should_announce(&[word(&[0, 1])], t0));
        assert!(debouncer.should_announce(&[word(&[0, 1, 2])], t0 + Duration::from_secs(1)));
    }

    #[test]
    fn identical_guess_after_window_is_announced() {
        let mut debouncer = GuessDebouncer::default();
        let t0 = Instant::now();

        assert!(debouncer.should_announce(&[word(&[0, 1])], t0));
        assert!(debouncer.should_announce(&[word(&[0, 1])], t0 + Duration::from_secs(11)));
    }

    #[test]
    fn continuous_repeats_keep_extending_the_window() {
        let mut debouncer = GuessDebouncer::default();
        let t0 = Instant::now();
        let guess = [word(&[0, 1])];

        assert!(debouncer.should_announce(&guess, t0));
        // Each repeat lands inside the window and slides it forward,
        // so the signal stays suppressed well past the first deadline.
        for i in 1..=4u64 {
            assert!(!debouncer.should_announce(&guess, t0 + Duration::from_secs(6 * i)));
        }
    }

    #[test]
    fn empty_guess_debounces_like_any_other() {
        let mut debouncer = GuessDebouncer::default();
        let t0 = Instant::now();

        assert!(debouncer.should_announce(&[], t0));
        assert!(!debouncer.should_announce(&[], t0 + Duration::from_secs(1)));
        assert!(debouncer.should_announce(&[word(&[2, 3])], t0 + Duration::from_secs(2)));
    }
}
