use ratatui::{
    prelude::{Buffer, Rect},
    widgets::{Block, Widget},
};
use roomcraft_engine::{GridPosition, Layout};

use crate::ui::widgets::{block_margins, style};

/// Terminal columns per grid cell.
const CELL_WIDTH: u16 = 2;

/// Footprint preview of the room about to be placed.
#[derive(Debug, Clone, Copy)]
pub struct Ghost {
    pub rect: roomcraft_engine::Rect,
    pub fits: bool,
}

impl Ghost {
    fn covers(&self, x: i32, y: i32) -> bool {
        let rect = self.rect;
        rect.x <= x && i64::from(x) < rect.right() && rect.y <= y && i64::from(y) < rect.bottom()
    }
}

#[derive(Debug)]
pub struct GridDisplay<'a> {
    layout: &'a Layout,
    cursor: Option<GridPosition>,
    ghost: Option<Ghost>,
    block: Option<Block<'a>>,
}

impl<'a> GridDisplay<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            cursor: None,
            ghost: None,
            block: None,
        }
    }

    pub fn cursor(self, cursor: GridPosition) -> Self {
        Self {
            cursor: Some(cursor),
            ..self
        }
    }

    pub fn ghost(self, ghost: Ghost) -> Self {
        Self {
            ghost: Some(ghost),
            ..self
        }
    }

    pub fn block(self, block: Block<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        self.layout.grid().width * CELL_WIDTH + block_margins(self.block.as_ref()).0
    }

    pub fn height(&self) -> u16 {
        self.layout.grid().height + block_margins(self.block.as_ref()).1
    }

    fn render_cell(&self, column: u16, row: u16, area: Rect, buf: &mut Buffer) {
        let (x, y) = (i32::from(column), i32::from(row));
        let (mut cell_style, symbol) = match self.layout.room_at(x, y) {
            Some(room) => {
                let is_anchor = room.position() == Some(GridPosition::new(x, y));
                let symbol = if is_anchor {
                    room.spec().name.get(..usize::from(CELL_WIDTH)).unwrap_or_default()
                } else {
                    ""
                };
                (style::room(room.spec().category), symbol)
            }
            None => (style::EMPTY, "· "),
        };
        if let Some(ghost) = self.ghost
            && ghost.covers(x, y)
        {
            cell_style = if ghost.fits {
                style::GHOST_FITS
            } else {
                style::GHOST_BLOCKED
            };
        }
        if self.cursor == Some(GridPosition::new(x, y)) {
            cell_style = cell_style.patch(style::CURSOR);
        }

        let cell = Rect::new(area.x + column * CELL_WIDTH, area.y + row, CELL_WIDTH, 1);
        if area.contains(cell.as_position()) && cell.right() <= area.right() {
            buf.set_style(cell, cell_style);
            buf.set_string(cell.x, cell.y, symbol, cell_style);
        }
    }
}

impl Widget for GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &GridDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let inner = match &self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.clone().render(area, buf);
                inner
            }
            None => area,
        };
        let grid = self.layout.grid();
        for row in 0..grid.height {
            for column in 0..grid.width {
                self.render_cell(column, row, inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use roomcraft_engine::builtin_levels;

    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    #[test]
    fn test_renders_rooms_and_empty_cells() {
        let level = &builtin_levels()[0];
        let mut layout = Layout::new(level);
        layout
            .place(&"kitchen".into(), GridPosition::new(1, 0))
            .unwrap();

        let widget = GridDisplay::new(&layout);
        assert_eq!((widget.width(), widget.height()), (16, 6));
        let mut buf = Buffer::empty(Rect::new(0, 0, widget.width(), widget.height()));
        widget.render(buf.area, &mut buf);

        assert!(row_text(&buf, 0).starts_with("· Ki  · "));
        assert_eq!(buf[(2, 1)].bg, style::room(level.rooms[1].category).bg.unwrap());
        assert_eq!(row_text(&buf, 5), "· ".repeat(8));
    }

    #[test]
    fn test_block_adds_border() {
        let level = &builtin_levels()[0];
        let layout = Layout::new(level);
        let widget = GridDisplay::new(&layout).block(Block::bordered());
        assert_eq!((widget.width(), widget.height()), (18, 8));
    }
}
