#![forbid(unsafe_code)]

//! The application palette.

use rekey_render::cell::Rgba;

/// Foreground colors.
pub mod fg {
    use super::Rgba;

    /// Primary text.
    pub const PRIMARY: Rgba = Rgba::rgb(225, 225, 230);
    /// De-emphasized text (labels, policy list).
    pub const MUTED: Rgba = Rgba::rgb(140, 140, 150);
}

/// Accent colors.
pub mod accent {
    use super::Rgba;

    /// Error messages and error borders.
    pub const ERROR: Rgba = Rgba::rgb(220, 80, 64);
    /// Interactive highlights.
    pub const INFO: Rgba = Rgba::rgb(80, 160, 240);
    /// Positive feedback.
    pub const SUCCESS: Rgba = Rgba::rgb(64, 200, 120);
}
