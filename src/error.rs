//! Error types for bracket construction and result entry

use std::fmt;

use thiserror::Error;

/// Kind of record a lookup failed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Tournament,
    Entrant,
    Match,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Tournament => write!(f, "tournament"),
            RecordKind::Entrant => write!(f, "entrant"),
            RecordKind::Match => write!(f, "match"),
        }
    }
}

/// Input rejected before any state was mutated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed score '{input}' (expected sets like \"6-4 4-6 7-5\")")]
    MalformedScore { input: String },

    #[error("{field} is required")]
    MissingName { field: &'static str },

    #[error("{field} is too long ({len} characters, at most {max})")]
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("{count} entrants do not fit a bracket of {size}")]
    TooManyEntrants { count: usize, size: usize },

    #[error("a bracket of {size} needs at least {required} entrants, got {count}")]
    NotEnoughEntrants {
        count: usize,
        required: usize,
        size: usize,
    },

    #[error("interval of {minutes} minutes is out of range (0..=1440)")]
    IntervalOutOfRange { minutes: i64 },

    #[error("invalid date/time '{input}' (expected YYYY-MM-DDTHH:MM)")]
    MalformedTime { input: String },

    #[error("unknown slot {slot} (expected 1 or 2, or 0 to clear)")]
    UnknownSlot { slot: u8 },

    #[error("slot {slot} holds a bye, which cannot win a match")]
    ByeCannotWin { slot: u8 },
}

/// Errors raised by bracket operations
#[derive(Debug, Error)]
pub enum BracketError {
    /// Unsupported bracket configuration, rejected before any write
    #[error("unsupported bracket size {size} (expected 4, 8 or 16)")]
    Configuration { size: u32 },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} #{id} not found")]
    NotFound { kind: RecordKind, id: u32 },

    #[error("no match at round {round}, position {position}")]
    NoMatchAt { round: u32, position: u32 },
}

impl BracketError {
    /// Create an unsupported size error
    pub fn unsupported_size(size: u32) -> Self {
        Self::Configuration { size }
    }

    /// Create a not found error
    pub fn not_found(kind: RecordKind, id: u32) -> Self {
        Self::NotFound { kind, id }
    }

    /// Create an error for a round/position lookup that matched nothing
    pub fn no_match_at(round: u32, position: u32) -> Self {
        Self::NoMatchAt { round, position }
    }

    /// Whether the error leaves stored state untouched and can be re-prompted
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
