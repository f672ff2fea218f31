//! Room-layout challenge engine.
//!
//! - [`core`] - Data model: rooms, levels, the grid geometry, the placement validator,
//!   [`Layout`] and the [`ScoreResult`] produced when a layout is scored
//! - [`engine`] - Challenge lifecycle: [`ChallengeSession`], [`Countdown`] and undo history
//!
//! Scoring itself lives in the `roomcraft-evaluator` crate, which implements
//! [`LayoutScorer`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Why a room could not be placed, moved or rotated.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    #[display("no room `{room}` in this level")]
    UnknownRoom { room: RoomId },
    #[display("room `{room}` at ({}, {}) leaves the grid", position.x, position.y)]
    OutOfBounds {
        room: RoomId,
        position: GridPosition,
    },
    #[display("room `{room}` would overlap room `{other}`")]
    Overlap { room: RoomId, other: RoomId },
    #[display("room `{room}` cannot rotate in place")]
    RotationBlocked {
        room: RoomId,
        source: Box<PlacementError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ChallengeError {
    #[display("challenge is {state}, not in progress")]
    NotInProgress { state: ChallengeState },
    #[display("challenge has not been scored yet")]
    NotFinished,
    #[display("{_0}")]
    #[from]
    Placement(#[error(not(source))] PlacementError),
}
