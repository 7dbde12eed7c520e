#![forbid(unsafe_code)]

//! Full-frame terminal presenter.
//!
//! Writes a finished [`Buffer`] to any `Write` sink using crossterm
//! commands. Every frame repaints the whole grid; color and attribute
//! state is tracked across cells so unchanged state emits no escapes.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};

use crate::buffer::Buffer;
use crate::cell::{Rgba, StyleFlags};

/// Present a buffer to the given sink and flush it.
///
/// # Errors
///
/// Propagates I/O errors from the underlying writer.
pub fn present(buf: &Buffer, out: &mut impl Write) -> io::Result<()> {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "present",
        w = buf.width(),
        h = buf.height()
    )
    .entered();

    let mut state = PenState::default();
    queue!(out, SetAttribute(Attribute::Reset))?;

    for y in 0..buf.height() {
        queue!(out, MoveTo(0, y))?;
        for cell in buf.row_cells(y) {
            state.sync(out, cell.fg, cell.bg, cell.flags)?;
            queue!(out, Print(cell.ch))?;
        }
    }

    queue!(out, SetAttribute(Attribute::Reset))?;
    out.flush()
}

/// Tracks the fg/bg/attribute state last written to the terminal.
#[derive(Debug, Default)]
struct PenState {
    fg: Rgba,
    bg: Rgba,
    flags: StyleFlags,
}

impl PenState {
    fn sync(
        &mut self,
        out: &mut impl Write,
        fg: Rgba,
        bg: Rgba,
        flags: StyleFlags,
    ) -> io::Result<()> {
        if flags != self.flags {
            // Attributes cannot be cleared individually across terminals;
            // reset and replay, which also invalidates the colors.
            queue!(out, SetAttribute(Attribute::Reset))?;
            self.fg = Rgba::TRANSPARENT;
            self.bg = Rgba::TRANSPARENT;
            for attr in attributes(flags) {
                queue!(out, SetAttribute(attr))?;
            }
            self.flags = flags;
        }
        if fg != self.fg {
            queue!(out, SetForegroundColor(to_color(fg)))?;
            self.fg = fg;
        }
        if bg != self.bg {
            queue!(out, SetBackgroundColor(to_color(bg)))?;
            self.bg = bg;
        }
        Ok(())
    }
}

fn to_color(color: Rgba) -> Color {
    if color.is_opaque() {
        Color::Rgb {
            r: color.r(),
            g: color.g(),
            b: color.b(),
        }
    } else {
        Color::Reset
    }
}

fn attributes(flags: StyleFlags) -> impl Iterator<Item = Attribute> {
    [
        (StyleFlags::BOLD, Attribute::Bold),
        (StyleFlags::DIM, Attribute::Dim),
        (StyleFlags::UNDERLINE, Attribute::Underlined),
        (StyleFlags::REVERSE, Attribute::Reverse),
    ]
    .into_iter()
    .filter_map(move |(flag, attr)| flags.contains(flag).then_some(attr))
}
