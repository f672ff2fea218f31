use arrayvec::ArrayVec;

use crate::core::{GridPosition, RoomId, Rotation};

/// A room placement recorded for undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub room: RoomId,
    pub position: GridPosition,
    pub rotation: Rotation,
}

/// Number of placements kept for undo.
pub const HISTORY_CAPACITY: usize = 10;

/// Most recent placements, newest last.
///
/// Holds at most [`HISTORY_CAPACITY`] entries; pushing onto a full history
/// discards the oldest entry.
#[derive(Debug, Default, Clone)]
pub struct PlacementHistory {
    entries: ArrayVec<HistoryEntry, HISTORY_CAPACITY>,
}

impl PlacementHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries.iter()
    }
}
