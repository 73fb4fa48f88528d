//! Scan-first intake pipeline
//!
//! Classifies the raw scan, then routes it: identifiers go through the
//! composer and mismatch detector, serials through the serial classifier.

use ig_error::ValidationError;
use tracing::info;

use super::composer::assess_device;
use super::mismatch::detect_mismatch;
use super::severity::{Findings, Severity};
use crate::constants::identifier::BODY_LEN;
use crate::data::{BrandGuess, IntakeReport, ScanKind};
use crate::identity::{classify_scan, classify_serial, normalize_identifier, normalize_serial};
use crate::tac::{resolve_tac, TacSource};

/// Classify one serial and record any failure. Fabricated shapes are High,
/// everything else Medium.
fn check_serial(findings: &mut Findings, serial: &str, claim: Option<&str>) -> Option<BrandGuess> {
    match classify_serial(serial, claim) {
        Ok(guess) => Some(guess),
        Err(e) => {
            let severity = match e {
                ValidationError::SuspiciousPattern { .. } => Severity::High,
                _ => Severity::Medium,
            };
            findings.flag(e.to_string(), severity);
            None
        }
    }
}

/// Run the full intake flow for one scan. Never fails.
///
/// A scan that was completed from 14 digits is assessed as scanned, so the
/// missing check digit is reported. On the serial route a separately
/// captured `serial` is checked as well when it differs from the scan;
/// `claimed_model` only matters on the identifier route, since serial
/// shapes carry no model.
pub fn inspect(
    source: &dyn TacSource,
    fake_prefixes: &[String],
    raw: &str,
    serial: Option<&str>,
    claimed_brand: &str,
    claimed_model: &str,
) -> IntakeReport {
    let scan = classify_scan(raw);

    let intake = match scan.kind {
        ScanKind::Identifier => {
            let value = scan.normalized_value.as_str();
            let scanned = normalize_identifier(raw);
            let assessed = if scanned.len() == BODY_LEN {
                scanned.as_str()
            } else {
                value
            };
            let report = assess_device(
                source,
                fake_prefixes,
                assessed,
                serial,
                claimed_brand,
                claimed_model,
            );
            IntakeReport {
                resolution: Some(resolve_tac(source, value)),
                mismatch: Some(detect_mismatch(source, value, claimed_brand, claimed_model)),
                report,
                serial: None,
                scan,
            }
        }
        ScanKind::Serial => {
            let claim = Some(claimed_brand).filter(|b| !b.trim().is_empty());
            let mut findings = Findings::new();
            let guess = check_serial(&mut findings, &scan.normalized_value, claim);
            if let Some(extra) = serial.filter(|s| !s.trim().is_empty()) {
                if normalize_serial(extra) != scan.normalized_value {
                    check_serial(&mut findings, extra, claim);
                }
            }
            IntakeReport {
                report: findings.into_report(),
                resolution: None,
                mismatch: None,
                serial: guess,
                scan,
            }
        }
        ScanKind::Unrecognized => {
            let mut findings = Findings::new();
            findings.flag(
                "Scan was not recognised as an IMEI or a serial number",
                Severity::Medium,
            );
            IntakeReport {
                report: findings.into_report(),
                resolution: None,
                mismatch: None,
                serial: None,
                scan,
            }
        }
    };

    info!(
        kind = ?intake.scan.kind,
        suspicious = intake.report.is_suspicious,
        severity = %intake.report.severity,
        "Intake inspection complete"
    );
    intake
}
