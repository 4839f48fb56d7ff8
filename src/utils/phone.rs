//! US phone number validation.

use once_cell::sync::Lazy;
use regex::Regex;

/// `+1` followed by exactly ten ASCII digits.
static US_E164: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+1[0-9]{10}$").unwrap());

/// Check whether `number` is a US number in E.164 form (`+1XXXXXXXXXX`).
///
/// ```rust
/// use n2p_relay::is_valid_us_e164;
///
/// assert!(is_valid_us_e164("+15551234567"));
/// assert!(!is_valid_us_e164("15551234567"));
/// ```
pub fn is_valid_us_e164(number: &str) -> bool {
    US_E164.is_match(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_us_e164() {
        assert!(is_valid_us_e164("+15551234567"));
        assert!(is_valid_us_e164("+17543050540"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(!is_valid_us_e164("+1555123456"));
        assert!(!is_valid_us_e164("+155512345678"));
        assert!(!is_valid_us_e164("+1"));
        assert!(!is_valid_us_e164(""));
    }

    #[test]
    fn test_rejects_missing_prefix() {
        assert!(!is_valid_us_e164("15551234567"));
        assert!(!is_valid_us_e164("5551234567"));
        assert!(!is_valid_us_e164("+445551234567"));
    }

    #[test]
    fn test_rejects_surrounding_text() {
        assert!(!is_valid_us_e164(" +15551234567"));
        assert!(!is_valid_us_e164("+15551234567\n"));
        assert!(!is_valid_us_e164("+1555123456x"));
        assert!(!is_valid_us_e164("+1 555 123 4567"));
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Fullwidth digit seven.
        assert!(!is_valid_us_e164("+1555123456７"));
    }
}
