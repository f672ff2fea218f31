use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{
    geometry::GridSize,
    room::{RoomId, RoomSpec, Rotation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// The immutable problem statement of one challenge.
///
/// A level is never mutated during play; only the placement state of its rooms
/// (held by a [`Layout`](super::layout::Layout)) changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "grid_size")]
    pub grid: GridSize,
    /// Challenge duration in seconds. Only feeds the time bonus.
    pub time_limit: u32,
    /// Efficiency needed to pass. Informational.
    pub target_score: f64,
    #[serde(default)]
    pub xp_reward: u32,
    #[serde(default)]
    pub hints: Vec<String>,
    pub rooms: Vec<RoomSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum LevelError {
    #[display("level {level} declares no rooms")]
    NoRooms { level: u32 },
    #[display("level {level} has an empty grid")]
    EmptyGrid { level: u32 },
    #[display("level {level} has no time limit")]
    NoTimeLimit { level: u32 },
    #[display("level {level} declares room `{room}` more than once")]
    DuplicateRoom { level: u32, room: RoomId },
    #[display("room `{room}` in level {level} has an empty footprint")]
    EmptyFootprint { level: u32, room: RoomId },
    #[display("room `{room}` in level {level} has zero priority")]
    ZeroPriority { level: u32, room: RoomId },
    #[display("room `{room}` in level {level} does not fit the grid in any rotation")]
    RoomTooLarge { level: u32, room: RoomId },
}

impl LevelDefinition {
    #[must_use]
    pub fn room(&self, id: &RoomId) -> Option<&RoomSpec> {
        self.rooms.iter().find(|room| &room.id == id)
    }

    /// Checks that the level is playable.
    ///
    /// Adjacency preferences naming rooms the level does not declare are accepted;
    /// they are simply never satisfied when scoring.
    pub fn validate(&self) -> Result<(), LevelError> {
        let level = self.id;
        if self.rooms.is_empty() {
            return Err(LevelError::NoRooms { level });
        }
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(LevelError::EmptyGrid { level });
        }
        if self.time_limit == 0 {
            return Err(LevelError::NoTimeLimit { level });
        }

        let mut seen = HashSet::new();
        for room in &self.rooms {
            let id = || room.id.clone();
            if !seen.insert(&room.id) {
                return Err(LevelError::DuplicateRoom { level, room: id() });
            }
            if room.footprint.width == 0 || room.footprint.height == 0 {
                return Err(LevelError::EmptyFootprint { level, room: id() });
            }
            if room.priority == 0 {
                return Err(LevelError::ZeroPriority { level, room: id() });
            }
            let fits = [Rotation::Deg0, Rotation::Deg90].into_iter().any(|rotation| {
                let size = room.footprint.rotated(rotation);
                size.width <= self.grid.width && size.height <= self.grid.height
            });
            if !fits {
                return Err(LevelError::RoomTooLarge { level, room: id() });
            }
        }
        Ok(())
    }
}
