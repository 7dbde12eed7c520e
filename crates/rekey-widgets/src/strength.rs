#![forbid(unsafe_code)]

//! Password strength classification.
//!
//! Strength is the count of satisfied character-class predicates — upper
//! case, lower case, digit, non-word — mapped onto a fixed five-step scale.
//! This is deliberate UI feedback, not entropy estimation: the displayed
//! level must match what the policy bullets tell the user to add.

/// Discrete strength level for a candidate password.
///
/// The level is the number of satisfied character classes (0–4); the label
/// is a pure function of the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Strength {
    /// No character class satisfied (empty input, or only underscores).
    #[default]
    None,
    /// Exactly one character class satisfied.
    Weak,
    /// Two character classes satisfied.
    Medium,
    /// Three character classes satisfied.
    Good,
    /// All four character classes satisfied.
    Strong,
}

impl Strength {
    /// Number of levels on the scale, for meter ratios.
    pub const MAX_LEVEL: u8 = 4;

    /// Classify a candidate password.
    ///
    /// Pure and total: every string maps to a level, recomputed from
    /// scratch on each call.
    #[must_use]
    pub fn classify(password: &str) -> Self {
        let classes = [
            has_upper(password),
            has_lower(password),
            has_digit(password),
            has_symbol(password),
        ];
        let count = classes.iter().filter(|&&hit| hit).count() as u8;
        Self::from_count(count)
    }

    const fn from_count(count: u8) -> Self {
        match count {
            0 => Self::None,
            1 => Self::Weak,
            2 => Self::Medium,
            3 => Self::Good,
            _ => Self::Strong,
        }
    }

    /// The numeric level, 0–4.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Weak => 1,
            Self::Medium => 2,
            Self::Good => 3,
            Self::Strong => 4,
        }
    }

    /// The display label for this level.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Weak => "weak",
            Self::Medium => "medium",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }
}

fn has_upper(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_uppercase())
}

fn has_lower(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_lowercase())
}

fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

// Non-word in the regex sense: anything outside [A-Za-z0-9_]. Underscore is
// a word character and never counts; any non-ASCII character does.
fn has_symbol(s: &str) -> bool {
    s.chars().any(|c| !(c.is_ascii_alphanumeric() || c == '_'))
}
