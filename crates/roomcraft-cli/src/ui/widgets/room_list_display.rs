use ratatui::{
    prelude::{Buffer, Rect},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use roomcraft_engine::RoomBlock;

use crate::ui::widgets::{block_margins, style};

/// Rooms of the level with their size, rotation and whether they are on the grid.
#[derive(Debug)]
pub struct RoomListDisplay<'a> {
    rooms: &'a [RoomBlock],
    selected: usize,
    block: Option<Block<'a>>,
}

impl<'a> RoomListDisplay<'a> {
    pub fn new(rooms: &'a [RoomBlock], selected: usize) -> Self {
        Self {
            rooms,
            selected,
            block: None,
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.rooms.len()).unwrap_or(u16::MAX);
        rows.saturating_add(block_margins(self.block.as_ref()).1)
    }

    fn line(&self, index: usize, room: &RoomBlock) -> Line<'a> {
        let spec = room.spec();
        let size = room.effective_size();
        let is_selected = index == self.selected;
        let marker = if is_selected { "▶" } else { " " };
        let name_style = if is_selected {
            style::SELECTED
        } else {
            style::DEFAULT
        };
        let state = match room.position() {
            Some(position) => format!("at {},{}", position.x, position.y),
            None => "unplaced".to_owned(),
        };
        Line::from(vec![
            Span::raw(format!("{marker}{} ", index + 1)),
            Span::styled("  ", style::room(spec.category)),
            Span::styled(format!(" {:<12}", spec.name), name_style),
            Span::raw(format!(
                "{}x{} {:>3}° P{} ",
                size.width,
                size.height,
                room.rotation().degrees(),
                spec.priority
            )),
            Span::styled(state, style::DIM),
        ])
    }
}

impl Widget for RoomListDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &RoomListDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let lines = self
            .rooms
            .iter()
            .enumerate()
            .map(|(index, room)| self.line(index, room))
            .collect::<Vec<_>>();
        let mut paragraph = Paragraph::new(lines).style(style::DEFAULT);
        if let Some(block) = &self.block {
            paragraph = paragraph.block(block.clone());
        }
        paragraph.render(area, buf);
    }
}
