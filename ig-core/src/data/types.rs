//! Core data types for imeiguard
//!
//! Every derived structure here is produced fresh per call and never mutated
//! afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assess::Severity;

/// A checksum-validated 15-digit device identifier
///
/// Only [`crate::validate_identifier`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DeviceIdentifier(pub(crate) String);

impl DeviceIdentifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full 8-digit type allocation code
    pub fn tac(&self) -> &str {
        &self.0[..crate::constants::tac::FULL_LEN]
    }

    pub fn check_digit(&self) -> u8 {
        self.0.as_bytes()[crate::constants::identifier::BODY_LEN] - b'0'
    }
}

impl fmt::Display for DeviceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DeviceIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What a raw scan looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanKind {
    Identifier,
    Serial,
    Unrecognized,
}

/// Result of classifying one raw scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanClassification {
    pub kind: ScanKind,
    /// Cleaned value; the untouched input when unrecognized
    pub normalized_value: String,
    /// 0-100
    pub confidence: u8,
}

/// One row of the TAC reference table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacEntry {
    /// 6 to 8 digits
    pub prefix: String,
    pub brand: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl TacEntry {
    pub fn new(prefix: impl Into<String>, brand: impl Into<String>, model: Option<&str>) -> Self {
        Self {
            prefix: prefix.into(),
            brand: brand.into(),
            model: model.map(str::to_string),
        }
    }
}

/// Best-effort identity inferred from the leading digits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacResolution {
    pub brand: Option<String>,
    pub model: Option<String>,
    /// 0 means "no information"
    pub confidence: u8,
    /// Table prefix that produced the match, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_prefix: Option<String>,
}

impl TacResolution {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.brand.is_some() && self.confidence > 0
    }
}

/// Vendor guess derived from a serial number's shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandGuess {
    pub serial: String,
    pub detected_brand: Option<String>,
    pub is_valid: bool,
}

/// Graded suspicion verdict for one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuspicionReport {
    pub is_suspicious: bool,
    pub reasons: Vec<String>,
    pub severity: Severity,
}

impl SuspicionReport {
    pub fn clean() -> Self {
        Self {
            is_suspicious: false,
            reasons: Vec::new(),
            severity: Severity::Low,
        }
    }
}

/// Whether the resolved identity disagrees with what the operator entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchResult {
    pub mismatch: bool,
    pub suggested_brand: Option<String>,
    pub suggested_model: Option<String>,
    pub message: Option<String>,
}

impl MismatchResult {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Everything the intake pipeline learned about one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeReport {
    pub scan: ScanClassification,
    pub report: SuspicionReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<TacResolution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<MismatchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<BrandGuess>,
}
