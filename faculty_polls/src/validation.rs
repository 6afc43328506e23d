//! Input validation predicates.
//!
//! All functions here are pure: no state, no I/O. They mirror the checks the
//! registration and poll-creation forms apply before any mutation happens.

use chrono::{Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static pattern"));

/// True iff the string is empty after trimming surrounding whitespace.
pub fn is_empty(s: &str) -> bool {
    s.trim().is_empty()
}

/// True iff the trimmed string has at least `n` characters.
pub fn has_min_length(s: &str, n: usize) -> bool {
    s.trim().chars().count() >= n
}

/// Usernames are non-empty and restricted to letters, digits and underscores.
pub fn is_valid_username(s: &str) -> bool {
    USERNAME_PATTERN.is_match(s)
}

/// Passwords need at least 6 characters, one letter and one digit.
/// The remaining characters are unconstrained.
pub fn is_secure_password(s: &str) -> bool {
    s.chars().count() >= 6
        && s.chars().any(|c| c.is_ascii_alphabetic())
        && s.chars().any(|c| c.is_ascii_digit())
}

/// Parses a `YYYY-MM-DD` calendar date and keeps it only if it is strictly
/// later than the current local day ("tomorrow or later", not "later today").
pub fn parse_future_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .filter(|d| *d > Local::now().date_naive())
}

/// True iff the string is a calendar date strictly after the current day.
/// Unparseable input is not a future date.
pub fn is_future_date(s: &str) -> bool {
    parse_future_date(s).is_some()
}

/// True iff at least 2 options remain after trimming each one and discarding
/// the empty results.
pub fn has_minimum_options(options: &[String]) -> bool {
    options.iter().filter(|opt| !opt.trim().is_empty()).count() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn empty_detects_whitespace_only() {
        assert!(is_empty(""));
        assert!(is_empty("   "));
        assert!(is_empty("\t \n"));
        assert!(!is_empty(" a "));
    }

    #[test]
    fn min_length_ignores_surrounding_whitespace() {
        assert!(has_min_length("abc", 3));
        assert!(has_min_length("  abc  ", 3));
        assert!(!has_min_length("ab", 3));
    }

    #[test]
    fn username_pattern() {
        assert!(is_valid_username("ab_12"));
        assert!(!is_valid_username("a b"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("a-b"));
        assert!(!is_valid_username("ñandu"));
    }

    #[test]
    fn password_strength() {
        assert!(is_secure_password("abcde1"));
        assert!(!is_secure_password("abcdef"), "no digit");
        assert!(!is_secure_password("123456"), "no letter");
        assert!(!is_secure_password("a1234"), "too short");
        // Extra characters beyond letters and digits are allowed.
        assert!(is_secure_password("a1!!!!"));
    }

    #[test]
    fn future_date_is_strictly_after_today() {
        let today = Local::now().date_naive();
        let tomorrow = today + Duration::days(1);
        let yesterday = today - Duration::days(1);
        assert!(!is_future_date(&today.format("%Y-%m-%d").to_string()));
        assert!(is_future_date(&tomorrow.format("%Y-%m-%d").to_string()));
        assert!(!is_future_date(&yesterday.format("%Y-%m-%d").to_string()));
        assert!(!is_future_date("not a date"));
        assert!(!is_future_date(""));
    }

    #[test]
    fn minimum_options_after_trimming() {
        let ok = vec!["a".to_string(), " ".to_string(), "b".to_string()];
        assert!(has_minimum_options(&ok));
        let not_enough = vec!["a".to_string(), "".to_string()];
        assert!(!has_minimum_options(&not_enough));
        assert!(!has_minimum_options(&[]));
    }
}
