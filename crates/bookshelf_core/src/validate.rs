//! Allow-list validation for flat catalog input.
//!
//! # Responsibility
//! - Decide whether user-supplied text may reach the flat catalog storage.
//!
//! # Invariants
//! - Accepted text is non-empty and consists only of ASCII letters, ASCII
//!   digits and ASCII whitespace.
//! - Everything else is rejected, including apostrophes, hyphens and
//!   accented letters. This is a known limitation of the flat catalog.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ALLOWED_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9\t\n\x0B\x0C\r ]+$").expect("valid allow-list regex")
});

/// Reason a value was rejected by the allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Empty,
    /// First character outside the allow-list.
    DisallowedCharacter(char),
}

/// Rejection of one named input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: RejectReason,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            RejectReason::Empty => write!(f, "{} must not be empty", self.field),
            RejectReason::DisallowedCharacter(ch) if ch.is_control() => write!(
                f,
                "{} contains control character {:?}; only latin letters, digits and spaces are allowed",
                self.field, ch
            ),
            RejectReason::DisallowedCharacter(ch) => write!(
                f,
                "{} contains `{ch}`; only latin letters, digits and spaces are allowed",
                self.field
            ),
        }
    }
}

impl Error for ValidationError {}

/// Returns whether `value` passes the allow-list.
pub fn is_allowed_text(value: &str) -> bool {
    ALLOWED_TEXT_RE.is_match(value)
}

/// Checks one field value against the allow-list.
///
/// # Errors
/// - `RejectReason::Empty` for an empty value.
/// - `RejectReason::DisallowedCharacter` naming the first offending char.
pub fn check_field(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_allowed_text(value) {
        return Ok(());
    }

    let reason = value
        .chars()
        .find(|ch| !is_allowed_char(*ch))
        .map_or(RejectReason::Empty, RejectReason::DisallowedCharacter);
    Err(ValidationError { field, reason })
}

fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '\t' | '\n' | '\x0B' | '\x0C' | '\r' | ' ')
}
