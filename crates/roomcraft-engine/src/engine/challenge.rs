use serde::{Deserialize, Serialize};

use crate::{
    ChallengeError,
    core::{
        GridPosition, Layout, LayoutScorer, LevelDefinition, RoomBlock, RoomId, Rotation,
        ScoreResult,
    },
};

use super::{
    countdown::{Countdown, TickOutcome, TimerToken},
    history::{HistoryEntry, PlacementHistory},
};

/// Lifecycle of one attempt at a level.
///
/// ```text
/// InProgress ──submit──▶ Submitted ──review──▶ Reviewed
///      │                                          ▲
///      └──timer expires──▶ TimedOut ──review──────┘
/// ```
///
/// `reset` returns any state to a fresh `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, derive_more::Display)]
pub enum ChallengeState {
    InProgress,
    Submitted,
    TimedOut,
    Reviewed,
}

/// How a scored attempt ended.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::IsVariant,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    #[display("submitted")]
    Submitted,
    #[display("timed out")]
    TimedOut,
}

/// A finished attempt: how it ended, the time left and the score it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub kind: SubmissionKind,
    pub time_remaining_secs: u32,
    pub result: ScoreResult,
}

/// One player's attempt at one level.
///
/// Owns the level, the mutable layout, the undo history and the countdown. Placement
/// operations are accepted only while the attempt is in progress. Leaving the
/// in-progress state (submit, timeout or reset) always cancels the countdown.
///
/// # Example
///
/// ```
/// use roomcraft_engine::{ChallengeSession, GridPosition, builtin_levels};
/// # #[derive(Debug)]
/// # struct Zero;
/// # impl roomcraft_engine::LayoutScorer for Zero {
/// #     fn score(
/// #         &self,
/// #         _: &roomcraft_engine::LevelDefinition,
/// #         _: &[roomcraft_engine::RoomBlock],
/// #         _: u32,
/// #     ) -> roomcraft_engine::ScoreResult {
/// #         roomcraft_engine::ScoreResult::incomplete("")
/// #     }
/// # }
///
/// let level = builtin_levels().remove(0);
/// let mut session = ChallengeSession::new(level, Box::new(Zero));
/// session.place(&"living".into(), GridPosition::new(0, 0)).unwrap();
/// session.submit().unwrap();
/// assert!(session.state().is_submitted());
/// ```
#[derive(Debug)]
pub struct ChallengeSession {
    level: LevelDefinition,
    layout: Layout,
    history: PlacementHistory,
    countdown: Countdown,
    timer: TimerToken,
    state: ChallengeState,
    submission: Option<Submission>,
    scorer: Box<dyn LayoutScorer>,
}

impl ChallengeSession {
    /// Starts an attempt: every room unplaced, countdown running from the level's time
    /// limit.
    #[must_use]
    pub fn new(level: LevelDefinition, scorer: Box<dyn LayoutScorer>) -> Self {
        let layout = Layout::new(&level);
        let mut countdown = Countdown::new();
        let timer = countdown.start(level.time_limit);
        Self {
            level,
            layout,
            history: PlacementHistory::new(),
            countdown,
            timer,
            state: ChallengeState::InProgress,
            submission: None,
            scorer,
        }
    }

    #[must_use]
    pub fn level(&self) -> &LevelDefinition {
        &self.level
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn history(&self) -> &PlacementHistory {
        &self.history
    }

    #[must_use]
    pub fn state(&self) -> ChallengeState {
        self.state
    }

    /// Token of the countdown started for the current attempt.
    #[must_use]
    pub fn timer_token(&self) -> TimerToken {
        self.timer
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.countdown.is_running()
    }

    #[must_use]
    pub fn time_remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    /// The scored submission, once the attempt has ended.
    #[must_use]
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    #[must_use]
    pub fn result(&self) -> Option<&ScoreResult> {
        self.submission.as_ref().map(|submission| &submission.result)
    }

    fn ensure_in_progress(&self) -> Result<(), ChallengeError> {
        if self.state.is_in_progress() {
            Ok(())
        } else {
            Err(ChallengeError::NotInProgress { state: self.state })
        }
    }

    /// Drops room `id` at `position`. A rejected placement leaves everything unchanged.
    pub fn place(&mut self, id: &RoomId, position: GridPosition) -> Result<(), ChallengeError> {
        self.ensure_in_progress()?;
        self.layout.place(id, position)?;
        let rotation = self
            .layout
            .room(id)
            .map_or(Rotation::default(), RoomBlock::rotation);
        self.history.push(HistoryEntry {
            room: id.clone(),
            position,
            rotation,
        });
        Ok(())
    }

    pub fn remove(&mut self, id: &RoomId) -> Result<bool, ChallengeError> {
        self.ensure_in_progress()?;
        Ok(self.layout.remove(id)?)
    }

    pub fn rotate(&mut self, id: &RoomId) -> Result<Rotation, ChallengeError> {
        self.ensure_in_progress()?;
        Ok(self.layout.rotate(id)?)
    }

    /// Takes the most recently placed room back off the grid.
    ///
    /// Returns the room that was removed, or `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<RoomId>, ChallengeError> {
        self.ensure_in_progress()?;
        let Some(entry) = self.history.pop() else {
            return Ok(None);
        };
        self.layout.remove(&entry.room)?;
        Ok(Some(entry.room))
    }

    /// Ends the attempt on the player's request and scores the layout.
    pub fn submit(&mut self) -> Result<&ScoreResult, ChallengeError> {
        self.ensure_in_progress()?;
        Ok(self.finish(SubmissionKind::Submitted))
    }

    /// Advances the countdown by one second.
    ///
    /// When the last second elapses the attempt ends as timed out and is scored.
    /// Ticks with a stale token, or arriving after the attempt ended, are ignored.
    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if !self.state.is_in_progress() {
            return TickOutcome::Ignored;
        }
        let outcome = self.countdown.tick(token);
        if outcome.is_expired() {
            self.finish(SubmissionKind::TimedOut);
        }
        outcome
    }

    /// Marks a scored attempt as shown to the player. Terminal until reset.
    pub fn review(&mut self) -> Result<&Submission, ChallengeError> {
        match self.state {
            ChallengeState::InProgress => Err(ChallengeError::NotFinished),
            ChallengeState::Submitted | ChallengeState::TimedOut | ChallengeState::Reviewed => {
                self.state = ChallengeState::Reviewed;
                self.submission.as_ref().ok_or(ChallengeError::NotFinished)
            }
        }
    }

    /// Discards the attempt and starts over with every room unplaced.
    ///
    /// The previous countdown is cancelled before the new one starts; the returned token
    /// identifies the new countdown.
    pub fn reset(&mut self) -> TimerToken {
        self.countdown.cancel();
        self.layout.reset();
        self.history.clear();
        self.submission = None;
        self.state = ChallengeState::InProgress;
        self.timer = self.countdown.start(self.level.time_limit);
        self.timer
    }

    fn finish(&mut self, kind: SubmissionKind) -> &ScoreResult {
        self.countdown.cancel();
        let time_remaining_secs = self.countdown.remaining_secs();
        let result = self
            .scorer
            .score(&self.level, self.layout.rooms(), time_remaining_secs);
        self.state = match kind {
            SubmissionKind::Submitted => ChallengeState::Submitted,
            SubmissionKind::TimedOut => ChallengeState::TimedOut,
        };
        &self
            .submission
            .insert(Submission {
                kind,
                time_remaining_secs,
                result,
            })
            .result
    }
}
