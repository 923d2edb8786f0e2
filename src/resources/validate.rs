//! Shared option validation and polling settings

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// Lowercase DNS-label style names: start with a letter, end with a letter
/// or digit, at most 63 characters.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]([a-z0-9-]{0,61}[a-z0-9])?$").expect("valid name regex"));

/// Fail when a required string option is blank
pub fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Fail unless `value` is a valid resource name
pub fn validate_name(field: &str, value: &str) -> Result<()> {
    if !NAME_RE.is_match(value) {
        return Err(Error::validation(
            field,
            format!(
                "'{value}' must be 1-63 lowercase letters, digits or '-', starting with a letter"
            ),
        ));
    }
    Ok(())
}

/// Render the canonical listing used in "must be one of" messages
pub(crate) fn one_of<T: std::fmt::Display>(values: &[T]) -> String {
    let names: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("must be one of: {}", names.join(", "))
}

/// How often and how long to poll while waiting on an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOpts {
    /// Delay between polls
    pub interval: Duration,
    /// Polls before giving up
    pub max_attempts: u32,
}

impl Default for PollOpts {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 150,
        }
    }
}

impl PollOpts {
    /// Poll every `interval` for at most `timeout`
    pub fn with_timeout(interval: Duration, timeout: Duration) -> Self {
        let interval_ms = interval.as_millis().max(1);
        let attempts = (timeout.as_millis() / interval_ms).max(1);
        Self {
            interval,
            max_attempts: u32::try_from(attempts).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a" ; "single letter")]
    #[test_case("my-registry" ; "hyphenated")]
    #[test_case("docker2" ; "trailing digit")]
    fn test_valid_names(name: &str) {
        assert!(validate_name("name", name).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("1abc" ; "leading digit")]
    #[test_case("abc-" ; "trailing hyphen")]
    #[test_case("Upper" ; "uppercase")]
    #[test_case("under_score" ; "underscore")]
    fn test_invalid_names(name: &str) {
        assert!(matches!(
            validate_name("name", name),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("name", "x").is_ok());
        assert!(require_non_empty("name", "  ").is_err());
    }

    #[test]
    fn test_poll_opts_with_timeout() {
        let opts = PollOpts::with_timeout(Duration::from_secs(2), Duration::from_secs(60));
        assert_eq!(opts.max_attempts, 30);

        let opts = PollOpts::with_timeout(Duration::from_secs(10), Duration::from_secs(1));
        assert_eq!(opts.max_attempts, 1);
    }

    #[test]
    fn test_one_of() {
        assert_eq!(one_of(&["A", "B"]), "must be one of: A, B");
    }
}
