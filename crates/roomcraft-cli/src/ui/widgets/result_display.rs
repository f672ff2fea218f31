use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};
use roomcraft_engine::{Submission, SubmissionKind};

use crate::{ui::widgets::style, util};

/// Score of a finished attempt with the feedback messages.
#[derive(Debug)]
pub struct ResultDisplay<'a> {
    submission: &'a Submission,
    xp: Option<u32>,
    block: Option<Block<'a>>,
}

impl<'a> ResultDisplay<'a> {
    pub fn new(submission: &'a Submission) -> Self {
        Self {
            submission,
            xp: None,
            block: None,
        }
    }

    /// Experience credited for the attempt, once it has been recorded.
    pub fn xp(self, xp: Option<u32>) -> Self {
        Self { xp, ..self }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let Submission {
            kind,
            time_remaining_secs,
            result,
        } = self.submission;
        let heading = match kind {
            SubmissionKind::Submitted => "Layout submitted",
            SubmissionKind::TimedOut => "Time's up!",
        };
        let verdict = if result.passed() {
            Span::styled("PASSED", style::PASSED)
        } else {
            Span::styled("TARGET NOT REACHED", style::FAILED)
        };

        let mut lines = vec![
            Line::from(heading),
            Line::from(vec![
                Span::styled(format!("{} ", result.stars()), style::SELECTED),
                Span::raw(format!("{}%  ", result.rounded_efficiency())),
                verdict,
            ]),
        ];
        if let Some(breakdown) = result.breakdown() {
            lines.push(Line::styled(
                format!(
                    "adjacency {}/{}  compact +{:.1}  time +{:.1} ({} left)",
                    breakdown.adjacency.achieved,
                    breakdown.adjacency.possible,
                    breakdown.compactness_bonus,
                    breakdown.time_bonus,
                    util::format_clock(*time_remaining_secs),
                ),
                style::DIM,
            ));
        }
        if let Some(xp) = self.xp {
            lines.push(Line::from(format!("+{xp} XP")));
        }
        lines.push(Line::default());
        lines.extend(
            result
                .feedback()
                .iter()
                .map(|message| Line::from(format!("• {message}"))),
        );
        lines
    }
}

impl Widget for ResultDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &ResultDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut paragraph = Paragraph::new(self.lines())
            .style(style::DEFAULT)
            .wrap(Wrap { trim: true });
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use roomcraft_engine::{ScoreResult, Stars};

    use super::*;

    #[test]
    fn test_lists_feedback_and_xp() {
        let submission = Submission {
            kind: SubmissionKind::TimedOut,
            time_remaining_secs: 0,
            result: ScoreResult::incomplete("Not all rooms were placed"),
        };
        let display = ResultDisplay::new(&submission).xp(Some(0));
        let text = display
            .lines()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        assert_eq!(text[0], "Time's up!");
        assert!(text[1].contains("0%"));
        assert!(text[1].contains("TARGET NOT REACHED"));
        assert!(text[1].starts_with(&Stars::ZERO.to_string()));
        assert!(text.contains(&"+0 XP".to_owned()));
        assert_eq!(text.last().unwrap(), "• Not all rooms were placed");
    }
}
