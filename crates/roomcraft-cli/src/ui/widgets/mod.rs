use ratatui::{layout::Rect, widgets::Block};

pub use self::{grid_display::*, result_display::*, room_list_display::*, status_display::*};

mod grid_display;
mod result_display;
mod room_list_display;
mod status_display;

mod color {
    use ratatui::style::Color;

    pub const SAND: Color = Color::Rgb(222, 184, 135);
    pub const TEAL: Color = Color::Rgb(64, 160, 160);
    pub const SLATE: Color = Color::Rgb(112, 128, 144);
    pub const PLUM: Color = Color::Rgb(150, 100, 160);
    pub const GREEN: Color = Color::Rgb(0, 200, 0);
    pub const RED: Color = Color::Rgb(220, 0, 0);
    pub const YELLOW: Color = Color::Rgb(255, 215, 0);
    pub const GRAY: Color = Color::Rgb(110, 110, 110);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use ratatui::style::{Color, Modifier, Style};
    use roomcraft_engine::RoomCategory;

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const EMPTY: Style = fg_bg(color::GRAY, color::BLACK);
    pub const CURSOR: Style = Style::new().add_modifier(Modifier::REVERSED);
    pub const GHOST_FITS: Style = fg_bg(color::BLACK, color::GREEN);
    pub const GHOST_BLOCKED: Style = fg_bg(color::WHITE, color::RED);
    pub const SELECTED: Style = Style::new().fg(color::YELLOW).add_modifier(Modifier::BOLD);
    pub const DIM: Style = Style::new().fg(color::GRAY);
    pub const PASSED: Style = Style::new().fg(color::GREEN).add_modifier(Modifier::BOLD);
    pub const FAILED: Style = Style::new().fg(color::RED).add_modifier(Modifier::BOLD);
    pub const WARNING: Style = Style::new().fg(color::RED);

    pub const fn room(category: RoomCategory) -> Style {
        let bg = match category {
            RoomCategory::Living => color::SAND,
            RoomCategory::Private => color::PLUM,
            RoomCategory::Service => color::TEAL,
            RoomCategory::Utility => color::SLATE,
        };
        fg_bg(color::BLACK, bg)
    }
}

fn block_margins(block: Option<&Block>) -> (u16, u16) {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    (outer.width - inner.width, outer.height - inner.height)
}
