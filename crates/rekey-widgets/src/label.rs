#![forbid(unsafe_code)]

//! Single-line styled text.

use rekey_core::geometry::Rect;
use rekey_render::buffer::Buffer;
use rekey_render::style::Style;

use crate::{Widget, draw_text_span};

/// A one-line text widget, clipped to its area.
#[derive(Debug, Clone, Copy, Default)]
pub struct Label<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> Label<'a> {
    /// Create a label.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    /// Set the text style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}

impl Widget for Label<'_> {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        draw_text_span(buf, area.x, area.y, self.text, self.style, area.right());
    }
}
