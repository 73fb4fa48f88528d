//! Unified error handling for imeiguard
//!
//! This crate provides the error types shared by every imeiguard component.
//! `ValidationError` is the modeled taxonomy the validators hand back to an
//! operator; `ImeiGuardError` covers everything else (loading reference data,
//! configuration, reading files).

use std::io;
use std::path::PathBuf;

/// Result type alias using ImeiGuardError
pub type Result<T> = std::result::Result<T, ImeiGuardError>;

/// Outcome of a failed identifier or serial check.
///
/// The `Display` text is an operator-facing sentence and is copied verbatim
/// into suspicion reports.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong length or character set
    #[error("{what} is malformed: {reason}")]
    Format { what: String, reason: String },

    /// Well-formed identifier whose check digit does not match
    #[error("IMEI checksum failed: expected check digit {expected}, found {found}")]
    Checksum { expected: u8, found: u8 },

    /// Well-formed input matching a known-bad lexical pattern
    #[error("{what} looks fabricated: {reason}")]
    SuspiciousPattern { what: String, reason: String },

    /// Soft signal: the serial's shape points at a different vendor
    #[error("Serial number format suggests {detected}, but device was entered as {claimed}")]
    BrandMismatch { detected: String, claimed: String },
}

impl ValidationError {
    pub fn format(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            what: what.into(),
            reason: reason.into(),
        }
    }

    pub fn suspicious(what: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SuspiciousPattern {
            what: what.into(),
            reason: reason.into(),
        }
    }

    /// Whether this outcome should only escalate, never reject
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::BrandMismatch { .. })
    }
}

/// Unified error type for all imeiguard operations
#[derive(thiserror::Error, Debug)]
pub enum ImeiGuardError {
    // ============================================================================
    // File System Errors
    // ============================================================================
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Reference Data Errors
    // ============================================================================
    #[error("Invalid TAC entry #{index}: {reason}")]
    InvalidTacEntry {
        index: usize,
        reason: String,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ImeiGuardError {
    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid reference table row error
    pub fn invalid_tac_entry(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTacEntry {
            index,
            reason: reason.into(),
        }
    }
}
