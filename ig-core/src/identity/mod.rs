//! Structural checks on scanned identities
//!
//! - `checksum` - 15-digit identifier validation
//! - `serial` - serial number shape and vendor guess
//! - `scan` - classification of arbitrary scans

mod checksum;
mod scan;
mod serial;

pub use checksum::{compute_check_digit, normalize_identifier, validate_identifier};
pub use scan::classify_scan;
pub use serial::{classify_serial, detect_serial_brand, normalize_serial};
