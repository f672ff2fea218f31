use std::time::Duration;

use chrono::Utc;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Paragraph, Wrap},
};
use roomcraft_engine::{
    ChallengeSession, GridPosition, LayoutScorer, LevelDefinition, Rect, RoomBlock, RoomId,
};
use roomcraft_store::{
    KeyValueStore,
    records::{ChallengeRecord, GameRecords},
};

use crate::{
    tui::{App, Runtime},
    ui::widgets::{Ghost, GridDisplay, ResultDisplay, RoomListDisplay, StatusDisplay, style},
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Interactive play of one level, recording every finished attempt.
#[derive(Debug)]
pub(crate) struct PlayApp<S> {
    session: ChallengeSession,
    records: GameRecords<S>,
    user: String,
    cursor: GridPosition,
    selected: usize,
    status: Option<String>,
    recorded: Vec<ChallengeRecord>,
    is_exiting: bool,
}

impl<S> PlayApp<S>
where
    S: KeyValueStore,
{
    pub(crate) fn new(
        level: LevelDefinition,
        scorer: Box<dyn LayoutScorer>,
        records: GameRecords<S>,
        user: &str,
    ) -> Self {
        Self {
            session: ChallengeSession::new(level, scorer),
            records,
            user: user.to_owned(),
            cursor: GridPosition::default(),
            selected: 0,
            status: None,
            recorded: vec![],
            is_exiting: false,
        }
    }

    pub(crate) fn into_recorded(self) -> Vec<ChallengeRecord> {
        self.recorded
    }

    fn selected_room(&self) -> Option<&RoomBlock> {
        self.session.layout().rooms().get(self.selected)
    }

    fn selected_id(&self) -> Option<RoomId> {
        self.selected_room().map(|room| room.id().clone())
    }

    fn move_cursor(&mut self, dx: i32, dy: i32) {
        let grid = self.session.layout().grid();
        self.cursor.x = (self.cursor.x + dx).clamp(0, i32::from(grid.width) - 1);
        self.cursor.y = (self.cursor.y + dy).clamp(0, i32::from(grid.height) - 1);
    }

    fn select(&mut self, index: usize) {
        if index < self.session.layout().rooms().len() {
            self.selected = index;
        }
    }

    fn select_next(&mut self, forward: bool) {
        let count = self.session.layout().rooms().len();
        if count > 0 {
            self.selected = if forward {
                (self.selected + 1) % count
            } else {
                (self.selected + count - 1) % count
            };
        }
    }

    /// Ghost of the selected room anchored at the cursor.
    fn ghost(&self) -> Option<Ghost> {
        let room = self.selected_room()?;
        let size = room.effective_size();
        let rect = Rect::new(
            self.cursor.x,
            self.cursor.y,
            i32::from(size.width),
            i32::from(size.height),
        );
        let fits = self.session.layout().can_place(room.id(), self.cursor);
        Some(Ghost { rect, fits })
    }

    fn place_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        match self.session.place(&id, self.cursor) {
            Ok(()) => {
                self.status = Some(format!("Placed {id}"));
                let rooms = self.session.layout().rooms();
                let current = self.selected;
                let next = (1..rooms.len())
                    .map(|offset| (current + offset) % rooms.len())
                    .find(|&index| !rooms[index].is_placed());
                if let Some(next) = next {
                    self.selected = next;
                }
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn rotate_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.status = Some(match self.session.rotate(&id) {
            Ok(rotation) => format!("Rotated {id} to {rotation}"),
            Err(err) => err.to_string(),
        });
    }

    fn remove_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.status = match self.session.remove(&id) {
            Ok(true) => Some(format!("Removed {id}")),
            Ok(false) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    fn undo(&mut self) {
        self.status = Some(match self.session.undo() {
            Ok(Some(id)) => format!("Took back {id}"),
            Ok(None) => "Nothing to undo".to_owned(),
            Err(err) => err.to_string(),
        });
    }

    fn submit(&mut self) {
        match self.session.submit() {
            Ok(result) => {
                self.status = Some(format!(
                    "Submitted: {}% {}",
                    result.rounded_efficiency(),
                    result.stars()
                ));
                self.record_submission();
            }
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    fn review(&mut self) {
        if let Err(err) = self.session.review() {
            self.status = Some(err.to_string());
        }
    }

    /// Starts a fresh attempt; the tick phase restarts with the new clock.
    fn retry(&mut self, runtime: &mut Runtime) {
        self.session.reset();
        runtime.set_tick_interval(Some(TICK_INTERVAL));
        self.cursor = GridPosition::default();
        self.selected = 0;
        self.status = Some("New attempt started".to_owned());
    }

    fn record_submission(&mut self) {
        let Some(submission) = self.session.submission() else {
            return;
        };
        match self
            .records
            .record_result(&self.user, self.session.level(), submission, Utc::now())
        {
            Ok(record) => self.recorded.push(record),
            Err(err) => self.status = Some(format!("Could not save result: {err}")),
        }
    }

    fn handle_key(&mut self, runtime: &mut Runtime, code: KeyCode) {
        let state = self.session.state();
        let in_progress = state.is_in_progress();
        match code {
            KeyCode::Left if in_progress => self.move_cursor(-1, 0),
            KeyCode::Right if in_progress => self.move_cursor(1, 0),
            KeyCode::Up if in_progress => self.move_cursor(0, -1),
            KeyCode::Down if in_progress => self.move_cursor(0, 1),
            KeyCode::Tab if in_progress => self.select_next(true),
            KeyCode::BackTab if in_progress => self.select_next(false),
            KeyCode::Char(ch @ '1'..='9') if in_progress => {
                if let Some(index) = "123456789".find(ch) {
                    self.select(index);
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') if in_progress => self.place_selected(),
            KeyCode::Char('r') if in_progress => self.rotate_selected(),
            KeyCode::Backspace | KeyCode::Delete if in_progress => self.remove_selected(),
            KeyCode::Char('u') if in_progress => self.undo(),
            KeyCode::Char('s') if in_progress => self.submit(),
            KeyCode::Enter if state.is_submitted() || state.is_timed_out() => self.review(),
            KeyCode::Char('n') => self.retry(runtime),
            KeyCode::Char('q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    fn help_text(&self) -> &'static str {
        let state = self.session.state();
        if state.is_in_progress() {
            "←↑→↓ Move | Tab/1-9 Select | Enter Place | R Rotate | Del Remove | U Undo | S Submit | N Restart | Q Quit"
        } else if state.is_reviewed() {
            "N Play again | Q Quit"
        } else {
            "Enter Continue | N Play again | Q Quit"
        }
    }
}

impl<S> App for PlayApp<S>
where
    S: KeyValueStore,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_interval(Some(TICK_INTERVAL));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        if let Some(event) = event.as_key_event() {
            self.handle_key(runtime, event.code);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let layout = self.session.layout();
        let level = self.session.level();
        let in_progress = self.session.state().is_in_progress();

        let status = StatusDisplay::new(&self.session);
        let grid = {
            let widget = GridDisplay::new(layout).block(Block::bordered().style(style::DEFAULT));
            match self.ghost() {
                Some(ghost) if in_progress => widget.cursor(self.cursor).ghost(ghost),
                _ => widget,
            }
        };
        let rooms = RoomListDisplay::new(layout.rooms(), self.selected)
            .block(Block::bordered().title(Line::from("ROOMS").centered()));

        let [status_area, main_area, message_area, help_area] = Layout::vertical([
            Constraint::Length(status.height()),
            Constraint::Min(grid.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [grid_area, side_area] = Layout::horizontal([
            Constraint::Length(grid.width()),
            Constraint::Min(30),
        ])
        .flex(Flex::Start)
        .spacing(1)
        .areas(main_area);
        let [grid_area] = Layout::vertical([Constraint::Length(grid.height())]).areas(grid_area);
        let [rooms_area, detail_area] =
            Layout::vertical([Constraint::Length(rooms.height()), Constraint::Min(0)])
                .areas(side_area);

        frame.render_widget(&status, status_area);
        frame.render_widget(&grid, grid_area);
        frame.render_widget(&rooms, rooms_area);

        let detail_block = |title| Block::bordered().title(Line::from(title).centered());
        if let Some(submission) = self.session.submission() {
            let xp = self.recorded.last().map(|record| record.xp_earned);
            let result = ResultDisplay::new(submission)
                .xp(xp)
                .block(detail_block("RESULT"));
            frame.render_widget(&result, detail_area);
        } else {
            let hints = level
                .hints
                .iter()
                .map(|hint| Line::from(format!("• {hint}")))
                .collect::<Vec<_>>();
            let hints = Paragraph::new(hints)
                .wrap(Wrap { trim: true })
                .block(detail_block("HINTS"));
            frame.render_widget(hints, detail_area);
        }

        if let Some(message) = &self.status {
            frame.render_widget(Text::from(message.as_str()), message_area);
        }
        let help = Text::from(self.help_text())
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, _runtime: &mut Runtime) {
        let token = self.session.timer_token();
        if self.session.tick(token).is_expired() {
            self.status = Some("Time's up!".to_owned());
            self.record_submission();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Instant};

    use roomcraft_engine::{ChallengeState, builtin_levels};
    use roomcraft_evaluator::layout_evaluator::LayoutEvaluator;
    use roomcraft_store::MemoryStore;

    use super::*;

    fn app() -> PlayApp<MemoryStore> {
        PlayApp::new(
            builtin_levels().remove(0),
            Box::new(LayoutEvaluator::default()),
            GameRecords::new(MemoryStore::new()),
            "ada",
        )
    }

    fn press(app: &mut PlayApp<MemoryStore>, codes: &[KeyCode]) {
        press_with(app, &mut Runtime::new(), codes);
    }

    fn press_with(app: &mut PlayApp<MemoryStore>, runtime: &mut Runtime, codes: &[KeyCode]) {
        for &code in codes {
            app.handle_key(runtime, code);
        }
    }

    #[test]
    fn test_cursor_stays_on_grid() {
        let mut app = app();
        press(&mut app, &[KeyCode::Left, KeyCode::Up]);
        assert_eq!(app.cursor, GridPosition::new(0, 0));
        press(&mut app, &[KeyCode::Right; 20]);
        assert_eq!(app.cursor, GridPosition::new(7, 0));
    }

    #[test]
    fn test_placing_advances_to_next_unplaced_room() {
        let mut app = app();
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.session.layout().rooms()[0].is_placed());
        assert_eq!(app.selected, 1);

        // kitchen would overlap the living room here
        press(&mut app, &[KeyCode::Enter]);
        assert!(!app.session.layout().rooms()[1].is_placed());
        assert!(app.status.as_deref().unwrap().contains("overlap"));
    }

    #[test]
    fn test_submit_records_result_and_review() {
        let mut app = app();
        // living at (0, 0), kitchen at (3, 0), bathroom at (0, 2)
        press(&mut app, &[KeyCode::Enter]);
        press(&mut app, &[KeyCode::Right; 3]);
        press(&mut app, &[KeyCode::Enter]);
        press(&mut app, &[KeyCode::Left; 3]);
        press(&mut app, &[KeyCode::Down; 2]);
        press(&mut app, &[KeyCode::Enter]);
        assert!(app.session.layout().is_complete());

        press(&mut app, &[KeyCode::Char('s')]);
        assert_eq!(app.session.state(), ChallengeState::Submitted);
        assert_eq!(app.recorded.len(), 1);
        assert!(app.recorded[0].passed);
        assert_eq!(app.records.results().unwrap().len(), 1);

        // placement keys are ignored once submitted
        press(&mut app, &[KeyCode::Char('u')]);
        assert!(app.session.layout().is_complete());

        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.session.state(), ChallengeState::Reviewed);

        press(&mut app, &[KeyCode::Char('n')]);
        assert_eq!(app.session.state(), ChallengeState::InProgress);
        assert_eq!(app.session.layout().placed_rooms().count(), 0);
    }

    #[test]
    fn test_timeout_records_incomplete_attempt() {
        let mut app = app();
        let mut runtime = Runtime::new();
        for _ in 0..app.session.level().time_limit {
            app.update(&mut runtime);
        }
        assert_eq!(app.session.state(), ChallengeState::TimedOut);
        assert_eq!(app.recorded.len(), 1);
        assert!(app.recorded[0].outcome.is_timed_out());
        assert_eq!(app.recorded[0].xp_earned, 0);
    }

    #[test]
    fn test_restart_realigns_tick_phase() {
        let mut app = app();
        let mut runtime = Runtime::new();
        app.init(&mut runtime);
        let first_deadline = runtime.next_tick();

        thread::sleep(Duration::from_millis(5));
        app.update(&mut runtime);
        press_with(&mut app, &mut runtime, &[KeyCode::Char('n')]);
        assert_eq!(app.session.state(), ChallengeState::InProgress);
        assert!(runtime.next_tick() > first_deadline);
        assert!(runtime.next_tick() <= Instant::now() + TICK_INTERVAL);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.should_exit());
    }
}
