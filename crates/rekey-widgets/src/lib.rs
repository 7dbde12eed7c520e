#![forbid(unsafe_code)]

//! Widgets for the rekey password-change form.

pub mod block;
pub mod form;
pub mod label;
pub mod meter;
pub mod strength;

pub use block::Block;
pub use form::{ChangePasswordForm, Field, FieldErrors, FormState, FocusTarget};
pub use label::Label;
pub use meter::StrengthMeter;
pub use strength::Strength;

use rekey_core::geometry::Rect;
use rekey_render::buffer::Buffer;
use rekey_render::style::Style;
use unicode_width::UnicodeWidthChar;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Buffer` within a given `Rect` and must
/// tolerate any area, including an empty one.
pub trait Widget {
    /// Render the widget into the buffer at the given area.
    fn render(&self, area: Rect, buf: &mut Buffer);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the buffer with mutable state.
    fn render(&self, area: Rect, buf: &mut Buffer, state: &mut Self::State);
}

/// Apply a style to all cells in a rectangular area.
///
/// This modifies existing cells, preserving their content.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    for y in area.y..area.bottom() {
        for x in area.x..area.right() {
            if let Some(cell) = buf.get_mut(x, y) {
                style.apply(cell);
            }
        }
    }
}

/// Draw a text span into a buffer at the given position.
///
/// Returns the x position after the last drawn character.
/// Stops at `max_x` (exclusive). Zero-width characters are skipped.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for ch in content.chars() {
        if x >= max_x {
            break;
        }
        let w = ch.width().unwrap_or(0);
        if w == 0 {
            continue;
        }
        if x + w as u16 > max_x {
            break;
        }
        let mut cell = rekey_render::cell::Cell::from_char(ch);
        style.apply(&mut cell);
        buf.set(x, y, cell);
        x = x.saturating_add(w as u16);
    }
    x
}
