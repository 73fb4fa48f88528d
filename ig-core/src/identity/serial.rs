//! Serial number classification
//!
//! Two lexical shapes are recognized. Samsung serials start with "RF", "RZ"
//! or "R" plus a digit and are 10-15 characters long; Apple serials are
//! 11-17 alphanumerics containing neither "RZ" nor "RF". The Samsung shape is
//! tested first, so at most one vendor is ever reported.

use ig_error::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::constants::brands;
use crate::constants::serial::{
    APPLE_EXCLUDED, MAX_LEN, MIN_LEN, SEQUENTIAL_FIXTURES, SEQUENTIAL_RUN_LEN,
};
use crate::data::BrandGuess;
use crate::matching::brands_agree;

lazy_static! {
    static ref SAMSUNG_SERIAL: Regex =
        Regex::new(r"^(RF|RZ|R[0-9])[A-Z0-9]{8,13}$").expect("samsung serial pattern is valid");
    static ref APPLE_SERIAL: Regex =
        Regex::new(r"^[A-Z0-9]{11,17}$").expect("apple serial pattern is valid");
}

/// Trim and uppercase
pub fn normalize_serial(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Vendor suggested by an already-normalized serial's shape
pub fn detect_serial_brand(serial: &str) -> Option<&'static str> {
    if SAMSUNG_SERIAL.is_match(serial) {
        return Some(brands::SAMSUNG);
    }
    if APPLE_SERIAL.is_match(serial) && !APPLE_EXCLUDED.iter().any(|s| serial.contains(s)) {
        return Some(brands::APPLE);
    }
    None
}

fn is_single_repeated_char(serial: &str) -> bool {
    let mut chars = serial.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}

/// Leading run of strictly ascending or strictly descending digits
fn has_sequential_prefix(serial: &str) -> bool {
    if SEQUENTIAL_FIXTURES.iter().any(|p| serial.starts_with(p)) {
        return true;
    }

    let head = match serial.get(..SEQUENTIAL_RUN_LEN) {
        Some(head) if head.bytes().all(|b| b.is_ascii_digit()) => head.as_bytes(),
        _ => return false,
    };

    let ascending = head.windows(2).all(|w| w[1] == w[0] + 1);
    let descending = head.windows(2).all(|w| w[0] == w[1] + 1);
    ascending || descending
}

/// Validate a serial number and guess its vendor
///
/// A claimed brand that disagrees with the detected one yields
/// `ValidationError::BrandMismatch`, a soft signal rather than a rejection.
pub fn classify_serial(
    raw: &str,
    claimed_brand: Option<&str>,
) -> Result<BrandGuess, ValidationError> {
    let serial = normalize_serial(raw);
    let len = serial.chars().count();

    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(ValidationError::format(
            "Serial number",
            format!("must be {}-{} characters (got {})", MIN_LEN, MAX_LEN, len),
        ));
    }

    if !serial.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::format(
            "Serial number",
            "must contain letters and digits only",
        ));
    }

    if is_single_repeated_char(&serial) {
        return Err(ValidationError::suspicious(
            "Serial number",
            "a single character repeated",
        ));
    }

    if has_sequential_prefix(&serial) {
        return Err(ValidationError::suspicious(
            "Serial number",
            "starts with a sequential digit run",
        ));
    }

    let detected = detect_serial_brand(&serial);
    debug!(serial = %serial, detected = ?detected, "Serial classified");

    if let (Some(detected), Some(claimed)) = (detected, claimed_brand) {
        if !brands_agree(detected, claimed) {
            return Err(ValidationError::BrandMismatch {
                detected: detected.to_string(),
                claimed: claimed.to_string(),
            });
        }
    }

    Ok(BrandGuess {
        serial,
        detected_brand: detected.map(str::to_string),
        is_valid: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samsung_serial_matches_claim() {
        let guess = classify_serial("RF8N70ABCD", Some("Samsung")).unwrap();
        assert_eq!(guess.detected_brand.as_deref(), Some("Samsung"));
        assert!(guess.is_valid);
    }

    #[test]
    fn test_repeated_character_rejected_regardless_of_claim() {
        for claim in [None, Some("Apple"), Some("Samsung")] {
            assert!(matches!(
                classify_serial("AAAAAAAAAA", claim),
                Err(ValidationError::SuspiciousPattern { .. })
            ));
        }
    }

    #[test]
    fn test_sequential_fixtures_rejected() {
        for prefix in SEQUENTIAL_FIXTURES {
            let serial = format!("{}XYZW", prefix);
            assert!(
                matches!(
                    classify_serial(&serial, None),
                    Err(ValidationError::SuspiciousPattern { .. })
                ),
                "{serial} should be suspicious"
            );
        }
    }

    #[test]
    fn test_generalized_sequential_runs() {
        assert!(has_sequential_prefix("456789AB"));
        assert!(has_sequential_prefix("987654AB"));
        assert!(!has_sequential_prefix("135790AB"));
        assert!(!has_sequential_prefix("12345A"));
    }

    #[test]
    fn test_length_limits() {
        assert!(matches!(
            classify_serial("ABC12", None),
            Err(ValidationError::Format { .. })
        ));
        assert!(matches!(
            classify_serial("A1B2C3D4E5F6G7H8J9K0L", None),
            Err(ValidationError::Format { .. })
        ));
    }

    #[test]
    fn test_apple_serial_against_samsung_claim() {
        let result = classify_serial("c02xk1abjg5h", Some("Samsung"));
        assert_eq!(
            result,
            Err(ValidationError::BrandMismatch {
                detected: "Apple".into(),
                claimed: "Samsung".into(),
            })
        );
    }

    #[test]
    fn test_shapes_are_exclusive() {
        assert_eq!(detect_serial_brand("R58M1234567"), Some("Samsung"));
        assert_eq!(detect_serial_brand("F2LXK1ABJG5H"), Some("Apple"));
        assert_eq!(detect_serial_brand("XRZ12345678"), None);
        assert_eq!(detect_serial_brand("AB12CD34"), None);
    }

    #[test]
    fn test_unknown_shape_is_valid_without_brand() {
        let guess = classify_serial("  ab12cd34 ", Some("Nokia")).unwrap();
        assert_eq!(guess.serial, "AB12CD34");
        assert_eq!(guess.detected_brand, None);
    }
}
