//! At most one outstanding AI search per game.

use std::sync::atomic::{AtomicBool, Ordering};

/// Tracks whether an AI request has already been sent for the current turn.
///
/// The game loop polls every tick; without this guard it would fire a new
/// search each time it notices the AI is to move.
#[derive(Debug, Default)]
pub struct SearchSlot {
    busy: AtomicBool,
}

/// Held while a search is in flight. Dropping it frees the slot.
#[derive(Debug)]
#[must_use = "the slot is released as soon as the ticket is dropped"]
pub struct SearchTicket<'a> {
    slot: &'a SearchSlot,
}

impl SearchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot, or `None` if a search is already running.
    pub fn try_begin(&self) -> Option<SearchTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SearchTicket { slot: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SearchTicket<'_> {
    fn drop(&mut self) {
        self.slot.busy.store(false, Ordering::Release);
    }
}
