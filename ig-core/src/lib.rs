//! imeiguard Core Library
//!
//! Device identity validation and counterfeit detection for phone intake
//! (trade-in, repair, inventory add).
//!
//! # Module Structure
//!
//! - `identity/` - IMEI checksum, serial classification, scan detection
//! - `tac/` - type allocation code reference table and resolver
//! - `assess/` - suspicion composer, mismatch detector, intake pipeline
//! - `data/` - result types
//!
//! All operations are pure and synchronous. The only shared resource is the
//! reference table, which is read-only once built.
//!
//! # Example
//!
//! ```
//! use ig_core::{Engine, Severity};
//!
//! let engine = Engine::default();
//! let report = engine.assess_device("353890110000004", None, "Samsung", "Galaxy S21");
//! assert!(report.is_suspicious);
//! assert_eq!(report.severity, Severity::Medium);
//! ```

// Grouped modules
pub mod assess;
pub mod data;
pub mod identity;
pub mod tac;

// Standalone modules
pub mod constants;
pub mod engine;
pub mod matching;

pub use assess::{assess_device, detect_mismatch, inspect, Findings, Severity};
pub use data::{
    BrandGuess, DeviceIdentifier, IntakeReport, MismatchResult, ScanClassification, ScanKind,
    SuspicionReport, TacEntry, TacResolution,
};
pub use engine::Engine;
pub use identity::{
    classify_scan, classify_serial, compute_check_digit, detect_serial_brand,
    normalize_identifier, normalize_serial, validate_identifier,
};
pub use matching::{brands_agree, model_agrees};
pub use tac::{resolve_tac, validate_tac_entry, TacSource, TacTable};

pub use ig_error::{ImeiGuardError, Result, ValidationError};
