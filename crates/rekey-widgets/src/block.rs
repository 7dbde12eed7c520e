#![forbid(unsafe_code)]

//! A bordered box with an optional title.

use rekey_core::geometry::{Rect, Sides};
use rekey_render::buffer::Buffer;
use rekey_render::cell::Cell;
use rekey_render::style::Style;

use crate::{Widget, draw_text_span, set_style_area};

/// Border character sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderType {
    /// Square corners: `┌ ┐ └ ┘`.
    #[default]
    Plain,
    /// Rounded corners: `╭ ╮ ╰ ╯`.
    Rounded,
}

impl BorderType {
    // (top-left, top-right, bottom-left, bottom-right, horizontal, vertical)
    const fn charset(self) -> (char, char, char, char, char, char) {
        match self {
            Self::Plain => ('┌', '┐', '└', '┘', '─', '│'),
            Self::Rounded => ('╭', '╮', '╰', '╯', '─', '│'),
        }
    }
}

/// A widget that draws a border around an area with an optional
/// centered title.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    border_type: BorderType,
    border_style: Style,
    title: Option<&'a str>,
    style: Style,
}

impl<'a> Block<'a> {
    /// Create a new block with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the border character set.
    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    /// Set the style applied to border characters.
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    /// Set the title rendered centered on the top border.
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the style applied to the block's interior.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The area remaining inside the borders.
    pub fn inner(&self, area: Rect) -> Rect {
        area.inner(Sides::all(1))
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        set_style_area(buf, area, self.style);

        if area.width < 2 || area.height < 2 {
            return;
        }

        let (tl, tr, bl, br, horizontal, vertical) = self.border_type.charset();
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        let border_cell = |ch: char| {
            let mut cell = Cell::from_char(ch);
            self.border_style.apply(&mut cell);
            cell
        };

        for x in area.x + 1..right {
            buf.set(x, area.y, border_cell(horizontal));
            buf.set(x, bottom, border_cell(horizontal));
        }
        for y in area.y + 1..bottom {
            buf.set(area.x, y, border_cell(vertical));
            buf.set(right, y, border_cell(vertical));
        }
        buf.set(area.x, area.y, border_cell(tl));
        buf.set(right, area.y, border_cell(tr));
        buf.set(area.x, bottom, border_cell(bl));
        buf.set(right, bottom, border_cell(br));

        if let Some(title) = self.title {
            let title_len = title.chars().count() as u16;
            let inner_width = area.width.saturating_sub(2);
            let start = area.x + 1 + inner_width.saturating_sub(title_len) / 2;
            draw_text_span(buf, start, area.y, title, self.border_style, right);
        }
    }
}
