//! Scan type detection
//!
//! Classifies whatever a barcode scanner or an operator produced, without
//! consulting the reference table.

use tracing::trace;

use super::checksum::{compute_check_digit, normalize_identifier, validate_identifier};
use crate::constants::identifier::{BODY_LEN, LEN};
use crate::constants::scan::*;
use crate::constants::serial::{MAX_LEN, MIN_LEN};
use crate::data::{ScanClassification, ScanKind};

/// Classify a raw scan. Never fails.
pub fn classify_scan(raw: &str) -> ScanClassification {
    let cleaned = normalize_identifier(raw);
    let all_digits = !cleaned.is_empty() && cleaned.bytes().all(|b| b.is_ascii_digit());

    let classification = if all_digits && cleaned.len() == LEN {
        let confidence = if validate_identifier(&cleaned).is_ok() {
            CONFIDENCE_VALID_IDENTIFIER
        } else {
            CONFIDENCE_BAD_CHECKSUM
        };
        identifier(cleaned, confidence)
    } else if all_digits && cleaned.len() == LEN + 1 {
        // Trailing extra digit is scanner noise
        identifier(cleaned[..LEN].to_string(), CONFIDENCE_TRAILING_DIGIT)
    } else if all_digits && cleaned.len() == BODY_LEN {
        match compute_check_digit(&cleaned) {
            Some(digit) => identifier(
                format!("{}{}", cleaned, digit),
                CONFIDENCE_MISSING_CHECK_DIGIT,
            ),
            None => unrecognized(raw),
        }
    } else if (MIN_LEN..=MAX_LEN).contains(&cleaned.len())
        && cleaned.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        ScanClassification {
            kind: ScanKind::Serial,
            normalized_value: cleaned.to_ascii_uppercase(),
            confidence: CONFIDENCE_SERIAL,
        }
    } else {
        unrecognized(raw)
    };

    trace!(
        kind = ?classification.kind,
        confidence = classification.confidence,
        "Scan classified"
    );
    classification
}

fn identifier(value: String, confidence: u8) -> ScanClassification {
    ScanClassification {
        kind: ScanKind::Identifier,
        normalized_value: value,
        confidence,
    }
}

fn unrecognized(raw: &str) -> ScanClassification {
    ScanClassification {
        kind: ScanKind::Unrecognized,
        normalized_value: raw.to_string(),
        confidence: CONFIDENCE_UNRECOGNIZED,
    }
}
