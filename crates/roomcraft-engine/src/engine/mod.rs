//! Challenge lifecycle built on top of the core data model.
//!
//! - [`ChallengeSession`] - One attempt at a level: layout, undo history, countdown and
//!   the score once the attempt ends
//! - [`Countdown`] - Per-second timer with at most one active run
//! - [`PlacementHistory`] - Bounded record of recent placements for undo
//!
//! # Attempt Flow
//!
//! 1. Create a [`ChallengeSession`] for a level; the countdown starts immediately
//! 2. Place, move, rotate and remove rooms while the attempt is in progress
//! 3. The attempt ends by [`ChallengeSession::submit`] or when the countdown expires,
//!    and the layout is scored once by the session's [`LayoutScorer`](crate::LayoutScorer)
//! 4. [`ChallengeSession::review`] marks the result as seen; [`ChallengeSession::reset`]
//!    starts over

pub use self::{challenge::*, countdown::*, history::*};

mod challenge;
mod countdown;
mod history;
