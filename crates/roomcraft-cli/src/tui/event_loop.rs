use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event};

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    Tick,
    /// The screen is out of date.
    Render,
    #[from]
    Terminal(Event),
}

/// Produces ticks at a fixed interval and a render after anything that may have changed
/// the screen.
#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    next_tick: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self {
            tick_interval: None,
            next_tick: Instant::now(),
            dirty: true,
        }
    }
}

impl EventLoop {
    /// The first tick fires one full interval after this call.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.tick_interval = interval;
        if let Some(interval) = interval {
            self.next_tick = Instant::now() + interval;
        }
    }

    #[cfg(test)]
    pub(super) fn next_tick(&self) -> Instant {
        self.next_tick
    }

    /// Blocks until the next tick, the next pending render or a terminal event.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if let Some(interval) = self.tick_interval
                && now >= self.next_tick
            {
                self.next_tick += interval;
                if self.next_tick < now {
                    self.next_tick = now + interval;
                }
                self.dirty = true;
                return Ok(TuiEvent::Tick);
            }

            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }

            let timeout = self
                .tick_interval
                .map(|_| self.next_tick.saturating_duration_since(now));
            let ready = match timeout {
                Some(timeout) => event::poll(timeout)?,
                None => true,
            };
            if ready {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}
