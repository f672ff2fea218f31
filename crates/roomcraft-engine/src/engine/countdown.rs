/// Identifies one started countdown.
///
/// Every [`Countdown::start`] hands out a fresh token; ticks carrying an older token are
/// ignored, so a timer left over from a previous attempt can never affect the current
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// One second elapsed; time is left.
    Running { remaining_secs: u32 },
    /// The last second elapsed. The countdown has stopped itself.
    Expired,
    /// The countdown is not running or the token is stale. Nothing changed.
    Ignored,
}

/// A per-second countdown with at most one active run.
#[derive(Debug, Clone)]
pub struct Countdown {
    generation: u64,
    remaining_secs: u32,
    running: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Countdown {
    /// Creates a stopped countdown.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generation: 0,
            remaining_secs: 0,
            running: false,
        }
    }

    /// Starts a new run of `secs` seconds, replacing any run in progress.
    pub fn start(&mut self, secs: u32) -> TimerToken {
        self.cancel();
        self.generation += 1;
        self.remaining_secs = secs;
        self.running = secs > 0;
        TimerToken(self.generation)
    }

    /// Stops the current run. Returns whether it was running; calling it again is a
    /// no-op.
    pub fn cancel(&mut self) -> bool {
        std::mem::replace(&mut self.running, false)
    }

    /// Advances the run identified by `token` by one second.
    pub fn tick(&mut self, token: TimerToken) -> TickOutcome {
        if !self.running || token != self.token() {
            return TickOutcome::Ignored;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.running = false;
            TickOutcome::Expired
        } else {
            TickOutcome::Running {
                remaining_secs: self.remaining_secs,
            }
        }
    }

    /// Token of the most recent run.
    #[must_use]
    pub const fn token(&self) -> TimerToken {
        TimerToken(self.generation)
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_runs_to_expiry() {
        let mut countdown = Countdown::new();
        let token = countdown.start(3);
        assert_eq!(
            countdown.tick(token),
            TickOutcome::Running { remaining_secs: 2 }
        );
        assert_eq!(
            countdown.tick(token),
            TickOutcome::Running { remaining_secs: 1 }
        );
        assert_eq!(countdown.tick(token), TickOutcome::Expired);
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(token), TickOutcome::Ignored);
        assert_eq!(countdown.remaining_secs(), 0);
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let mut countdown = Countdown::new();
        let token = countdown.start(10);
        assert!(countdown.cancel());
        assert!(!countdown.cancel());
        assert_eq!(countdown.tick(token), TickOutcome::Ignored);
        assert_eq!(countdown.remaining_secs(), 10);
    }

    #[test]
    fn test_restart_invalidates_previous_token() {
        let mut countdown = Countdown::new();
        let stale = countdown.start(10);
        let fresh = countdown.start(5);
        assert_ne!(stale, fresh);
        assert_eq!(countdown.tick(stale), TickOutcome::Ignored);
        assert_eq!(
            countdown.tick(fresh),
            TickOutcome::Running { remaining_secs: 4 }
        );
    }
}
