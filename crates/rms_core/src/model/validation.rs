//! Request-shape constraint checks shared by write paths.
//!
//! # Invariants
//! - Checks never touch storage.
//! - Failures are `ConstraintViolation`, distinct from `InvalidEnumValue`.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Inclusive lower bound for `Rating::rating_value`.
pub const RATING_VALUE_MIN: i64 = 1;
/// Inclusive upper bound for `Rating::rating_value`.
pub const RATING_VALUE_MAX: i64 = 10;

/// A field value violates a declared bound or requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    /// Offending field name as seen by callers.
    pub field: &'static str,
    /// Human-readable reason.
    pub reason: String,
}

impl ConstraintViolation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl Error for ConstraintViolation {}

/// Checks a rating value lies in `[1, 10]`.
pub fn validate_rating_value(value: i64) -> Result<i64, ConstraintViolation> {
    if (RATING_VALUE_MIN..=RATING_VALUE_MAX).contains(&value) {
        Ok(value)
    } else {
        Err(ConstraintViolation::new(
            "rating_value",
            format!(
                "must be between {RATING_VALUE_MIN} and {RATING_VALUE_MAX}, got {value}"
            ),
        ))
    }
}

/// Checks a required text field is non-blank and at most `max_chars` long.
///
/// The value is stored as given; only the blank check trims.
pub fn require_text<'a>(
    field: &'static str,
    value: &'a str,
    max_chars: usize,
) -> Result<&'a str, ConstraintViolation> {
    if value.trim().is_empty() {
        return Err(ConstraintViolation::new(field, "must not be blank"));
    }
    check_length(field, value, max_chars)?;
    Ok(value)
}

/// Checks an optional text field stays within `max_chars` when present.
pub fn optional_text<'a>(
    field: &'static str,
    value: Option<&'a str>,
    max_chars: usize,
) -> Result<Option<&'a str>, ConstraintViolation> {
    match value {
        Some(text) => {
            check_length(field, text, max_chars)?;
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

fn check_length(field: &'static str, value: &str, max_chars: usize) -> Result<(), ConstraintViolation> {
    let count = value.chars().count();
    if count > max_chars {
        return Err(ConstraintViolation::new(
            field,
            format!("must be at most {max_chars} characters, got {count}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{optional_text, require_text, validate_rating_value};

    #[test]
    fn rating_value_bounds_are_inclusive() {
        assert_eq!(validate_rating_value(1), Ok(1));
        assert_eq!(validate_rating_value(10), Ok(10));
        assert!(validate_rating_value(0).is_err());
        assert!(validate_rating_value(11).is_err());
        assert!(validate_rating_value(-3).is_err());
    }

    #[test]
    fn require_text_rejects_blank_and_long_values() {
        assert_eq!(require_text("title", "ok", 5), Ok("ok"));
        assert_eq!(require_text("title", "   ", 5).unwrap_err().field, "title");
        assert!(require_text("title", "toolong", 5).is_err());
    }

    #[test]
    fn optional_text_allows_none() {
        assert_eq!(optional_text("notes", None, 1), Ok(None));
        assert!(optional_text("notes", Some("ab"), 1).is_err());
    }
}
