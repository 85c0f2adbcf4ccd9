//! Save Scheduling
//!
//! Drives the core's `DebouncedSaver` with a browser timer. Each request
//! replaces the pending timer, so a burst of changes ends in one write of
//! the board as it is when the timer fires.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use sticker_board::{Board, DebouncedSaver};

use crate::storage::LocalStore;

#[derive(Clone, Copy)]
pub struct SaveScheduler {
    board: RwSignal<Board>,
    saver: StoredValue<DebouncedSaver<LocalStore>, LocalStorage>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    window_ms: u32,
}

impl SaveScheduler {
    pub fn new(board: RwSignal<Board>, store: LocalStore, window_ms: u32) -> Self {
        Self {
            board,
            saver: StoredValue::new_local(DebouncedSaver::new(store, window_ms as f64)),
            timer: StoredValue::new_local(None),
            window_ms,
        }
    }

    /// Schedules a save, or pushes back the one already scheduled
    pub fn request(self) {
        let now = js_sys::Date::now();
        self.saver.update_value(|saver| {
            saver.request(now);
        });
        self.schedule(self.window_ms);
    }

    fn schedule(self, delay_ms: u32) {
        let next = Timeout::new(delay_ms, move || self.fire());
        // Replacing the handle cancels the previous timer
        self.timer.set_value(Some(next));
    }

    /// The timer is the quiet period, so a pending save is written even if
    /// the clock reads a little short of the deadline
    fn fire(self) {
        let result = self
            .board
            .try_with_untracked(|board| self.saver.try_update_value(|saver| saver.flush(board)))
            .flatten();
        match result {
            Some(Ok(true)) | None => {}
            Some(Ok(false)) => log::debug!("[STORE] timer fired with nothing pending"),
            Some(Err(err)) => log::warn!("[STORE] save failed: {}", err),
        }
    }
}
