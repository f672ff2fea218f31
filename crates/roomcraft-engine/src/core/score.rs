use std::fmt;

use serde::{Deserialize, Serialize};

use super::{level::LevelDefinition, room::RoomBlock};

/// Star rating of a submission, from 0 to 3.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Stars(u8);

impl Stars {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const THREE: Self = Self(3);

    #[must_use]
    pub const fn count(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..3 {
            f.write_str(if i < self.0 { "★" } else { "☆" })?;
        }
        Ok(())
    }
}

/// Priority-weighted adjacency preferences: how many were met out of how many declared.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyTally {
    pub achieved: u64,
    pub possible: u64,
}

/// Intermediate values a complete layout was scored from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub adjacency: AdjacencyTally,
    pub adjacency_ratio: f64,
    pub compactness_bonus: f64,
    pub time_bonus: f64,
}

/// Outcome of one scoring pass over a submitted layout.
///
/// Created once per submission and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    efficiency: f64,
    stars: Stars,
    passed: bool,
    feedback: Vec<String>,
    breakdown: Option<ScoreBreakdown>,
}

impl ScoreResult {
    #[must_use]
    pub fn new(
        efficiency: f64,
        stars: Stars,
        passed: bool,
        feedback: Vec<String>,
        breakdown: Option<ScoreBreakdown>,
    ) -> Self {
        Self {
            efficiency: efficiency.clamp(0.0, 100.0),
            stars,
            passed,
            feedback,
            breakdown,
        }
    }

    /// Result for a layout with rooms still off the grid.
    #[must_use]
    pub fn incomplete(message: impl Into<String>) -> Self {
        Self::new(0.0, Stars::ZERO, false, vec![message.into()], None)
    }

    /// Efficiency in `[0, 100]`.
    #[must_use]
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Efficiency rounded to a whole percentage, as shown to players.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_efficiency(&self) -> u32 {
        self.efficiency.round() as u32
    }

    #[must_use]
    pub fn stars(&self) -> Stars {
        self.stars
    }

    /// Whether the level's target score was reached.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    #[must_use]
    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    /// `None` when the layout was incomplete and never scored.
    #[must_use]
    pub fn breakdown(&self) -> Option<&ScoreBreakdown> {
        self.breakdown.as_ref()
    }
}

/// Scores a submitted layout.
///
/// Implemented by the evaluator crate; a [`ChallengeSession`](crate::ChallengeSession)
/// holds one and runs it on submit and on timeout.
pub trait LayoutScorer: fmt::Debug {
    fn score(
        &self,
        level: &LevelDefinition,
        rooms: &[RoomBlock],
        time_remaining_secs: u32,
    ) -> ScoreResult;
}
