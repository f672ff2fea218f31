use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use roomcraft_engine::{ChallengeSession, ChallengeState};

use crate::{ui::widgets::style, util};

/// Seconds left at which the clock turns red.
const LOW_TIME_SECS: u32 = 30;

/// Level title, difficulty, target score, state and the countdown.
#[derive(Debug)]
pub struct StatusDisplay<'a> {
    session: &'a ChallengeSession,
}

impl<'a> StatusDisplay<'a> {
    pub fn new(session: &'a ChallengeSession) -> Self {
        Self { session }
    }

    pub fn height(&self) -> u16 {
        3
    }
}

impl Widget for StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatusDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let level = self.session.level();
        let remaining = self.session.time_remaining_secs();
        let clock_style = if remaining <= LOW_TIME_SECS {
            style::WARNING
        } else {
            style::DEFAULT
        };
        let state = match self.session.state() {
            ChallengeState::InProgress => "",
            ChallengeState::Submitted => "  SUBMITTED",
            ChallengeState::TimedOut => "  TIME'S UP",
            ChallengeState::Reviewed => "  REVIEWED",
        };
        let placed = self.session.layout().placed_rooms().count();
        let total = self.session.layout().rooms().len();

        let line = Line::from(vec![
            Span::styled(format!("{} ", level.title), style::SELECTED),
            Span::styled(format!("({}) ", level.difficulty), style::DIM),
            Span::raw(format!(
                "target {}%  rooms {placed}/{total}  ",
                level.target_score
            )),
            Span::styled(format!("⏱ {}", util::format_clock(remaining)), clock_style),
            Span::styled(state, style::WARNING),
        ]);
        Paragraph::new(line)
            .style(style::DEFAULT)
            .block(Block::bordered())
            .render(area, buf);
    }
}
