//! Suspicion composition
//!
//! Every check runs and every finding is kept; nothing short-circuits.
//! Malformed identifiers become reasons, never errors.

use tracing::debug;

use super::severity::{Findings, Severity};
use super::{conflicting_brand, describe};
use crate::constants::suspicion::{REPEATED_DIGITS, REPEATED_RUN_LEN};
use crate::identity::{classify_serial, normalize_identifier, validate_identifier};
use crate::tac::{resolve_tac, TacSource};

fn repeated_leading_digit(cleaned: &str) -> Option<char> {
    REPEATED_DIGITS.iter().copied().find(|&digit| {
        cleaned.chars().take(REPEATED_RUN_LEN).filter(|&c| c == digit).count() == REPEATED_RUN_LEN
    })
}

/// Grade how suspicious a device looks against what the operator entered
///
/// `fake_prefixes` is the full blacklist, fixture prefixes included.
pub fn assess_device(
    source: &dyn TacSource,
    fake_prefixes: &[String],
    identifier: &str,
    serial: Option<&str>,
    claimed_brand: &str,
    claimed_model: &str,
) -> crate::data::SuspicionReport {
    let cleaned = normalize_identifier(identifier);
    let mut findings = Findings::new();

    // Step 1: structure and check digit
    if let Err(e) = validate_identifier(&cleaned) {
        findings.flag(e.to_string(), Severity::High);
    }

    // Step 2: reference table against the claimed brand
    let resolution = resolve_tac(source, &cleaned);
    if let Some(brand) = conflicting_brand(&resolution, claimed_brand) {
        findings.flag(
            format!(
                "IMEI belongs to {} ({}% confidence), but device was entered as {}",
                describe(brand, resolution.model.as_deref()),
                resolution.confidence,
                describe(claimed_brand, Some(claimed_model)),
            ),
            Severity::Medium,
        );
    }

    // Step 3: serial number, when one was captured
    if let Some(serial) = serial.filter(|s| !s.trim().is_empty()) {
        if let Err(e) = classify_serial(serial, Some(claimed_brand)) {
            findings.flag(e.to_string(), Severity::Medium);
        }
    }

    // Step 4: leading run of repeated digits
    if let Some(digit) = repeated_leading_digit(&cleaned) {
        findings.flag(
            format!(
                "IMEI starts with {} or more repeated '{}' digits",
                REPEATED_RUN_LEN, digit
            ),
            Severity::High,
        );
    }

    // Step 5: known fake prefixes
    if let Some(prefix) = fake_prefixes.iter().find(|p| cleaned.starts_with(p.as_str())) {
        findings.flag(
            format!("IMEI matches known fake pattern ({})", prefix),
            Severity::High,
        );
    }

    debug!(
        severity = %findings.severity(),
        reasons = ?findings,
        "Device assessment complete"
    );

    findings.into_report()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assess::Severity;
    use crate::constants::suspicion::FAKE_PREFIXES;
    use crate::tac::TacTable;

    fn fixtures() -> Vec<String> {
        FAKE_PREFIXES.iter().map(|p| p.to_string()).collect()
    }

    fn assess(identifier: &str, serial: Option<&str>, brand: &str, model: &str) -> crate::data::SuspicionReport {
        assess_device(
            TacTable::builtin().as_ref(),
            &fixtures(),
            identifier,
            serial,
            brand,
            model,
        )
    }

    /// 35389011 + six zeros, with its check digit
    const IPHONE_13: &str = "353890110000004";

    #[test]
    fn test_genuine_device_is_clean() {
        let report = assess(IPHONE_13, None, "Apple", "iPhone 13");
        assert!(!report.is_suspicious, "{:?}", report.reasons);
        assert_eq!(report.severity, Severity::Low);
    }

    #[test]
    fn test_brand_disagreement_is_medium() {
        let report = assess(IPHONE_13, None, "Samsung", "Galaxy S21");
        assert!(report.is_suspicious);
        assert_eq!(report.severity, Severity::Medium);
        assert_eq!(report.reasons.len(), 1);
        assert!(report.reasons[0].contains("Apple iPhone 13"));
        assert!(report.reasons[0].contains("Samsung"));
    }

    #[test]
    fn test_brand_claim_is_case_insensitive() {
        assert!(!assess(IPHONE_13, None, "APPLE INC", "").is_suspicious);
    }

    #[test]
    fn test_bad_checksum_is_high() {
        let report = assess("353890110000001", None, "Apple", "iPhone 13");
        assert_eq!(report.severity, Severity::High);
        assert!(report.reasons[0].contains("checksum"));
    }

    #[test]
    fn test_all_zero_scan_is_high() {
        let report = assess("00000000000000", None, "Apple", "iPhone 13");
        assert!(report.is_suspicious);
        assert_eq!(report.severity, Severity::High);
        assert!(report.reasons.iter().any(|r| r.contains("repeated")));
        assert!(report.reasons.iter().any(|r| r.contains("known fake pattern")));
    }

    #[test]
    fn test_fake_prefix_with_valid_checksum() {
        // 12345678 + 000000 + check digit
        let report = assess("123456780000002", None, "Acme", "X");
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.reasons, vec!["IMEI matches known fake pattern (12345678)".to_string()]);
    }

    #[test]
    fn test_serial_failure_raises_to_medium() {
        let report = assess(IPHONE_13, Some("AAAAAAAAAA"), "Apple", "iPhone 13");
        assert_eq!(report.severity, Severity::Medium);
        assert_eq!(report.reasons.len(), 1);
    }

    #[test]
    fn test_serial_failure_does_not_downgrade_high() {
        let report = assess("111112222233333", Some("RF8N70ABCD"), "Apple", "iPhone");
        assert_eq!(report.severity, Severity::High);
        assert!(report.reasons.len() >= 2);
    }

    #[test]
    fn test_blank_serial_is_ignored() {
        assert!(!assess(IPHONE_13, Some("   "), "Apple", "iPhone 13").is_suspicious);
    }

    #[test]
    fn test_low_confidence_resolution_never_disagrees() {
        // Only the two-digit heuristic applies
        let report = assess("350000000000006", None, "Nokia", "3310");
        assert!(!report.reasons.iter().any(|r| r.contains("entered as")));
    }

    #[test]
    fn test_extra_fake_prefixes_apply() {
        let mut prefixes = fixtures();
        prefixes.push("35389011".to_string());
        let report = assess_device(
            TacTable::builtin().as_ref(),
            &prefixes,
            IPHONE_13,
            None,
            "Apple",
            "iPhone 13",
        );
        assert_eq!(report.severity, Severity::High);
    }
}
