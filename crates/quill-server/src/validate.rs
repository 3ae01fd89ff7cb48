//! Title validation.
//!
//! Guards the identifier segment of `/view/{title}`, `/edit/{title}` and
//! `/save/{title}` before any handler logic runs. Path decomposition
//! itself is the router's job; anything that doesn't match one of the
//! three routes is already a 404 by the time this code is reached.

use quill_config::ValidationMode;
use regex::Regex;

/// Validates page titles extracted from request paths.
///
/// The compiled pattern is built once at startup and shared through the
/// application state; it is never mutated afterwards.
pub(crate) struct TitleValidator {
    mode: ValidationMode,
    pattern: Regex,
}

impl TitleValidator {
    /// Create a validator for the given mode.
    ///
    /// # Panics
    ///
    /// Panics if the internal title regex fails to compile. This should
    /// never happen as the regex is a compile-time constant.
    #[must_use]
    pub(crate) fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            pattern: Regex::new(r"^[a-zA-Z0-9]+$").unwrap(),
        }
    }

    /// Check whether `title` is an acceptable page identifier.
    ///
    /// Strict mode enforces the alphanumeric character class. Prefix mode
    /// accepts any non-empty segment but still refuses separators and
    /// parent-directory sequences, which could otherwise reach the
    /// storage layer via percent-encoded path segments.
    pub(crate) fn check(&self, title: &str) -> bool {
        match self.mode {
            ValidationMode::Strict => self.pattern.is_match(title),
            ValidationMode::Prefix => {
                !title.is_empty() && !title.contains(['/', '\\']) && !title.contains("..")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_accepts_alphanumeric() {
        let validator = TitleValidator::new(ValidationMode::Strict);

        for title in ["Home", "Page1", "ABC123", "x"] {
            assert!(validator.check(title), "title: {title:?}");
        }
    }

    #[test]
    fn test_strict_rejects_non_alphanumeric() {
        let validator = TitleValidator::new(ValidationMode::Strict);

        for title in ["", "../etc", "a/b", "my page", "page!", "läge", "a.b"] {
            assert!(!validator.check(title), "title: {title:?}");
        }
    }

    #[test]
    fn test_prefix_accepts_any_plain_segment() {
        let validator = TitleValidator::new(ValidationMode::Prefix);

        for title in ["Home", "my page", "page!", "läge", "a.b"] {
            assert!(validator.check(title), "title: {title:?}");
        }
    }

    #[test]
    fn test_prefix_still_rejects_traversal() {
        let validator = TitleValidator::new(ValidationMode::Prefix);

        for title in ["", "../etc", "a/b", "a\\b", ".."] {
            assert!(!validator.check(title), "title: {title:?}");
        }
    }
}
