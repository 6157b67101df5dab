//! Sub-step log produced while a move resolves.
//!
//! The presentation layer replays these snapshots to animate a move; search
//! passes [`NullConsequences`] and pays nothing for them.

use serde::Serialize;

use crate::card::{CardId, Player};
use crate::rules::Placement;
use crate::state::GameState;

/// How long the presentation layer should hold each snapshot. Carries no
/// meaning for the rules themselves.
pub const PRESENTATION_MILLIS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    Passed {
        player: Player,
    },
    CardPlaced {
        card: CardId,
        placement: Placement,
        over: Option<CardId>,
    },
    CardReturned {
        card: CardId,
        player: Player,
    },
    CardsSwapped {
        modifier: CardId,
        from: Placement,
        to: Placement,
    },
    ColCleared {
        col: usize,
    },
    RowCleared {
        row: usize,
    },
    CardLost {
        card: CardId,
    },
}

/// An event together with the state right after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub event: Event,
    pub state: GameState,
    pub millis: u64,
}

pub trait Consequences {
    fn record(&mut self, event: Event, state: &GameState);
}

/// Keeps every snapshot, plus the cleared lines for quick inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingConsequences {
    pub snapshots: Vec<Snapshot>,
    pub rows_cleared: Vec<usize>,
    pub cols_cleared: Vec<usize>,
}

impl RecordingConsequences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.snapshots.iter().map(|snap| &snap.event)
    }
}

impl Consequences for RecordingConsequences {
    fn record(&mut self, event: Event, state: &GameState) {
        match event {
            Event::RowCleared { row } => self.rows_cleared.push(row),
            Event::ColCleared { col } => self.cols_cleared.push(col),
            _ => {}
        }
        self.snapshots.push(Snapshot {
            event,
            state: state.clone(),
            millis: PRESENTATION_MILLIS,
        });
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullConsequences;

impl Consequences for NullConsequences {
    #[inline]
    fn record(&mut self, _event: Event, _state: &GameState) {}
}
