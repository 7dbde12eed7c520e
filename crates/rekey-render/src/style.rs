#![forbid(unsafe_code)]

//! Style overlays applied to cells.

use crate::cell::{Cell, Rgba, StyleFlags};

/// A partial style: each component is optional and only set components are
/// applied, so styles compose as overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color override.
    pub fg: Option<Rgba>,
    /// Background color override.
    pub bg: Option<Rgba>,
    /// Attribute override.
    pub attrs: Option<StyleFlags>,
}

impl Style {
    /// Create an empty style (applies nothing).
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    /// Set the foreground color.
    pub const fn fg(mut self, color: Rgba) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    pub const fn bg(mut self, color: Rgba) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add the bold attribute.
    pub fn bold(self) -> Self {
        self.with_flag(StyleFlags::BOLD)
    }

    /// Add the dim attribute.
    pub fn dim(self) -> Self {
        self.with_flag(StyleFlags::DIM)
    }

    /// Add the underline attribute.
    pub fn underline(self) -> Self {
        self.with_flag(StyleFlags::UNDERLINE)
    }

    /// Add the reverse-video attribute.
    pub fn reverse(self) -> Self {
        self.with_flag(StyleFlags::REVERSE)
    }

    fn with_flag(mut self, flag: StyleFlags) -> Self {
        self.attrs = Some(self.attrs.unwrap_or_else(StyleFlags::empty) | flag);
        self
    }

    /// Whether the style applies nothing.
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }

    /// Apply set components to a cell, preserving its content.
    pub fn apply(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            cell.bg = bg;
        }
        if let Some(attrs) = self.attrs {
            cell.flags |= attrs;
        }
    }
}
