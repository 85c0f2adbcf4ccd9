//! Debounced Saving
//!
//! Every request pushes the deadline to `now + window`; the write happens
//! once the deadline passes with no further requests. Time is passed in by
//! the caller (milliseconds) so the same rule runs under a browser timer and
//! in tests.

use crate::board::Board;
use crate::domain::DomainResult;

use super::storage::KeyValueStore;

#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    window_ms: f64,
    deadline: Option<f64>,
    coalesced: u32,
}

impl Debouncer {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            deadline: None,
            coalesced: 0,
        }
    }

    pub fn window_ms(&self) -> f64 {
        self.window_ms
    }

    /// Arms or re-arms the deadline. Returns it.
    pub fn trigger(&mut self, now: f64) -> f64 {
        let deadline = now + self.window_ms;
        self.deadline = Some(deadline);
        self.coalesced += 1;
        deadline
    }

    /// True exactly once per quiet period, when `now` reached the deadline
    pub fn poll(&mut self, now: f64) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.coalesced = 0;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Requests folded into the pending write
    pub fn coalesced(&self) -> u32 {
        self.coalesced
    }

    fn clear(&mut self) {
        self.deadline = None;
        self.coalesced = 0;
    }
}

/// A debouncer bound to the store it writes to
#[derive(Debug)]
pub struct DebouncedSaver<S> {
    store: S,
    debouncer: Debouncer,
}

impl<S: KeyValueStore> DebouncedSaver<S> {
    pub fn new(store: S, window_ms: f64) -> Self {
        Self {
            store,
            debouncer: Debouncer::new(window_ms),
        }
    }

    pub fn request(&mut self, now: f64) -> f64 {
        self.debouncer.trigger(now)
    }

    /// Writes the board as it is right now if the quiet period is over.
    /// Returns whether a write happened.
    pub fn tick(&mut self, now: f64, board: &Board) -> DomainResult<bool> {
        let coalesced = self.debouncer.coalesced();
        if !self.debouncer.poll(now) {
            return Ok(false);
        }
        log::debug!("[STORE] saving after {} change(s)", coalesced);
        board.save(&mut self.store)?;
        Ok(true)
    }

    /// Writes immediately if anything is pending, deadline or not. A timer
    /// armed for the quiet period calls this when it fires.
    pub fn flush(&mut self, board: &Board) -> DomainResult<bool> {
        if !self.debouncer.is_pending() {
            return Ok(false);
        }
        self.debouncer.clear();
        board.save(&mut self.store)?;
        Ok(true)
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::domain::{FixedRandom, LayoutState};
    use crate::persist::MemoryStore;

    #[test]
    fn test_retrigger_pushes_deadline() {
        let mut debouncer = Debouncer::new(200.0);
        debouncer.trigger(0.0);
        debouncer.trigger(150.0);
        assert!(!debouncer.poll(200.0));
        assert!(!debouncer.poll(349.0));
        assert!(debouncer.poll(350.0));
        assert!(!debouncer.poll(400.0));
    }

    #[test]
    fn test_poll_without_trigger_never_fires() {
        let mut debouncer = Debouncer::new(200.0);
        assert!(!debouncer.poll(10_000.0));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_flush_writes_when_timer_beats_the_clock() {
        let board = Board::new(BoardConfig::default(), LayoutState::new(1, FixedRandom(0.5)));
        let mut saver = DebouncedSaver::new(MemoryStore::new(), 200.0);
        saver.request(1000.0);

        assert!(!saver.tick(1195.0, &board).unwrap());
        assert!(saver.is_pending());

        assert!(saver.flush(&board).unwrap());
        assert!(!saver.is_pending());
        assert_eq!(saver.store().writes(), 1);
        assert_eq!(saver.store().get("stickers"), Some("[]"));

        // Nothing left for a later tick to write twice
        assert!(!saver.tick(1300.0, &board).unwrap());
        assert_eq!(saver.store().writes(), 1);
    }

    #[test]
    fn test_flush_without_request_writes_nothing() {
        let board = Board::new(BoardConfig::default(), LayoutState::new(1, FixedRandom(0.5)));
        let mut saver = DebouncedSaver::new(MemoryStore::new(), 200.0);
        assert!(!saver.flush(&board).unwrap());
        assert_eq!(saver.store().writes(), 0);
    }

    #[test]
    fn test_coalesced_count_resets_after_fire() {
        let mut debouncer = Debouncer::new(200.0);
        for t in 0..3 {
            debouncer.trigger(t as f64);
        }
        assert_eq!(debouncer.coalesced(), 3);
        assert!(debouncer.poll(500.0));
        assert_eq!(debouncer.coalesced(), 0);
    }
}
