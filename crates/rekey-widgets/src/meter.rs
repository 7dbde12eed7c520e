#![forbid(unsafe_code)]

//! Strength meter widget.
//!
//! A compact indicator for the new-password field: an optional label line
//! (`Password strength - weak`) over a bar filled to level/4. The label
//! line only appears while the observed password is non-empty; the bar is
//! always drawn.

use rekey_core::geometry::Rect;
use rekey_render::buffer::Buffer;
use rekey_render::cell::{Cell, Rgba};
use rekey_render::style::Style;

use crate::strength::Strength;
use crate::{Widget, draw_text_span};

const LABEL_PREFIX: &str = "Password strength - ";

/// Per-level bar colors.
#[derive(Debug, Clone, Copy)]
pub struct MeterColors {
    pub weak: Rgba,
    pub medium: Rgba,
    pub good: Rgba,
    pub strong: Rgba,
}

impl Default for MeterColors {
    fn default() -> Self {
        Self {
            weak: Rgba::rgb(220, 80, 64),
            medium: Rgba::rgb(255, 180, 64),
            good: Rgba::rgb(80, 160, 240),
            strong: Rgba::rgb(64, 200, 120),
        }
    }
}

/// Password strength meter widget.
#[derive(Debug, Clone)]
pub struct StrengthMeter {
    strength: Strength,
    show_label: bool,
    width: u16,
    filled_char: char,
    empty_char: char,
    label_style: Style,
    colors: MeterColors,
}

impl StrengthMeter {
    /// Create a meter for a classified strength.
    pub fn new(strength: Strength) -> Self {
        Self {
            strength,
            show_label: false,
            width: 20,
            filled_char: '█',
            empty_char: '░',
            label_style: Style::new(),
            colors: MeterColors::default(),
        }
    }

    /// Create a meter directly from a candidate password: classifies it and
    /// shows the label line when the password is non-empty.
    pub fn for_password(password: &str) -> Self {
        Self::new(Strength::classify(password)).show_label(!password.is_empty())
    }

    /// Show or hide the label line.
    pub fn show_label(mut self, show: bool) -> Self {
        self.show_label = show;
        self
    }

    /// Override the bar width in cells.
    pub fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Use ASCII bar characters (`#` / `-`) instead of block glyphs.
    pub fn ascii(mut self) -> Self {
        self.filled_char = '#';
        self.empty_char = '-';
        self
    }

    /// Set the label style.
    pub fn label_style(mut self, style: Style) -> Self {
        self.label_style = style;
        self
    }

    /// Override the per-level colors.
    pub fn colors(mut self, colors: MeterColors) -> Self {
        self.colors = colors;
        self
    }

    /// The number of rows this meter occupies.
    pub fn height(&self) -> u16 {
        if self.show_label { 2 } else { 1 }
    }

    fn bar_color(&self) -> Rgba {
        match self.strength {
            Strength::None => Rgba::TRANSPARENT,
            Strength::Weak => self.colors.weak,
            Strength::Medium => self.colors.medium,
            Strength::Good => self.colors.good,
            Strength::Strong => self.colors.strong,
        }
    }

    fn filled_cells(&self, width: usize) -> usize {
        width * self.strength.level() as usize / Strength::MAX_LEVEL as usize
    }

    /// The label line text.
    pub fn label_text(&self) -> String {
        format!("{LABEL_PREFIX}{}", self.strength.label())
    }

    /// Render the bar as a string (for testing/debugging).
    pub fn render_string(&self) -> String {
        let width = self.width as usize;
        let filled = self.filled_cells(width);
        let mut out = String::with_capacity(width);
        out.extend(std::iter::repeat_n(self.filled_char, filled));
        out.extend(std::iter::repeat_n(self.empty_char, width - filled));
        out
    }
}

impl Widget for StrengthMeter {
    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }

        let mut y = area.y;
        if self.show_label {
            let label = self.label_text();
            draw_text_span(buf, area.x, y, &label, self.label_style, area.right());
            y = y.saturating_add(1);
            if y >= area.bottom() {
                return;
            }
        }

        let bar_width = self.width.min(area.width) as usize;
        let filled = self.filled_cells(bar_width);
        let color = self.bar_color();
        for i in 0..bar_width {
            let x = area.x + i as u16;
            let ch = if i < filled {
                self.filled_char
            } else {
                self.empty_char
            };
            let mut cell = Cell::from_char(ch);
            if i < filled {
                cell.fg = color;
            }
            buf.set(x, y, cell);
        }
    }
}
