//! Pincode validation
//!
//! Indian PIN codes are exactly six ASCII digits. Validation happens at two
//! points: while typing, where any digit string of up to six characters is
//! accepted so the field can be built up keystroke by keystroke, and at
//! submit time, where only a complete six-digit code may go out to the
//! lookup service.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::errors::PinseekError;

/// Message surfaced when a submitted pincode fails validation.
pub const INVALID_PINCODE_MESSAGE: &str = "Invalid pincode. Please enter a 6-digit number.";

/// Whether `candidate` is allowed in the input field: zero to six ASCII
/// digits and nothing else. A rejected candidate leaves the field unchanged.
pub fn is_partial_pincode(candidate: &str) -> bool {
    let partial = Regex::new(r"^[0-9]{0,6}$").unwrap();
    partial.is_match(candidate)
}

/// A validated six-digit Indian postal PIN code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pincode(String);

impl Pincode {
    /// Validate `candidate` as a complete pincode.
    pub fn parse(candidate: &str) -> Result<Pincode, PinseekError> {
        let complete = Regex::new(r"^[0-9]{6}$").unwrap();
        if complete.is_match(candidate) {
            Ok(Pincode(candidate.to_string()))
        } else {
            Err(PinseekError::InvalidPincode(
                INVALID_PINCODE_MESSAGE.to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Pincode {
    type Err = PinseekError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pincode::parse(s)
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_accepts_empty_and_prefixes() {
        assert!(is_partial_pincode(""));
        assert!(is_partial_pincode("1"));
        assert!(is_partial_pincode("110"));
        assert!(is_partial_pincode("110001"));
    }

    #[test]
    fn test_partial_rejects_overlong_input() {
        assert!(!is_partial_pincode("1100011"));
    }

    #[test]
    fn test_partial_rejects_non_digits() {
        assert!(!is_partial_pincode("11000a"));
        assert!(!is_partial_pincode("11 001"));
        assert!(!is_partial_pincode("-11000"));
        assert!(!is_partial_pincode("11.001"));
    }

    #[test]
    fn test_parse_accepts_complete_pincode() {
        let pincode = Pincode::parse("110001").unwrap();
        assert_eq!(pincode.as_str(), "110001");
        assert_eq!(pincode.to_string(), "110001");
    }

    #[test]
    fn test_parse_rejects_short_and_long_input() {
        assert!(Pincode::parse("11000").is_err());
        assert!(Pincode::parse("1100011").is_err());
        assert!(Pincode::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_mixed_characters() {
        assert!(Pincode::parse("11000x").is_err());
        assert!(Pincode::parse(" 110001").is_err());
    }

    #[test]
    fn test_parse_rejects_non_ascii_digits() {
        // Devanagari digits are decimal digits in Unicode but not valid here
        assert!(Pincode::parse("१२३४५६").is_err());
        assert!(!is_partial_pincode("१२३"));
    }

    #[test]
    fn test_parse_error_carries_user_message() {
        let err = Pincode::parse("abc").unwrap_err();
        assert_eq!(err.to_string(), INVALID_PINCODE_MESSAGE);
    }

    #[test]
    fn test_from_str_round_trip() {
        let pincode: Pincode = "560001".parse().unwrap();
        assert_eq!(pincode.as_str(), "560001");
    }
}
