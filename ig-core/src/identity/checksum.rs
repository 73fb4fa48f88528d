//! Identifier checksum validation
//!
//! Luhn variant over the first 14 digits: digits at odd (0-based) positions
//! are doubled, and a doubled value above 9 has 9 subtracted.

use ig_error::ValidationError;

use crate::constants::identifier::{BODY_LEN, LEN, SEPARATORS};
use crate::data::DeviceIdentifier;

/// Strip whitespace and dash separators
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !SEPARATORS.contains(c))
        .collect()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Check digit for a 14-digit body, or `None` if `body` is not 14 ASCII digits
pub fn compute_check_digit(body: &str) -> Option<u8> {
    if body.len() != BODY_LEN || !is_all_digits(body) {
        return None;
    }

    let sum: u32 = body
        .bytes()
        .enumerate()
        .map(|(index, b)| {
            let digit = u32::from(b - b'0');
            if index % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    Some(((10 - (sum % 10)) % 10) as u8)
}

/// Validate a raw identifier and return its normalized form
pub fn validate_identifier(raw: &str) -> Result<DeviceIdentifier, ValidationError> {
    let cleaned = normalize_identifier(raw);

    if !is_all_digits(&cleaned) {
        return Err(ValidationError::format(
            "IMEI",
            "must contain digits only",
        ));
    }

    if cleaned.len() != LEN {
        return Err(ValidationError::format(
            "IMEI",
            format!("must be exactly {} digits (got {})", LEN, cleaned.len()),
        ));
    }

    let expected = compute_check_digit(&cleaned[..BODY_LEN]).ok_or_else(|| {
        ValidationError::format("IMEI", "must contain digits only")
    })?;
    let found = cleaned.as_bytes()[BODY_LEN] - b'0';

    if expected != found {
        return Err(ValidationError::Checksum { expected, found });
    }

    Ok(DeviceIdentifier(cleaned))
}
