//! Constants and policy values for imeiguard
//!
//! Centralizes the lengths, confidence scores and fixture patterns the
//! engine works with. Never use magic numbers in other files - add them here first.

/// Device identifier (IMEI) shape
pub mod identifier {
    /// Digits in a complete identifier, check digit included
    pub const LEN: usize = 15;

    /// Digits covered by the check digit
    pub const BODY_LEN: usize = 14;

    /// Separators dropped before any identifier or scan check
    pub const SEPARATORS: &[char] = &['-'];
}

/// Serial number shape and lexical policies
pub mod serial {
    pub const MIN_LEN: usize = 8;
    pub const MAX_LEN: usize = 20;

    /// Length of the leading digit run treated as "sequential"
    pub const SEQUENTIAL_RUN_LEN: usize = 6;

    /// Representative sequential prefixes. Always rejected, independently of
    /// the generalized run check.
    pub const SEQUENTIAL_FIXTURES: &[&str] = &["012345", "123456", "234567", "654321"];

    /// Substrings that rule out the Apple serial shape
    pub const APPLE_EXCLUDED: &[&str] = &["RZ", "RF"];
}

/// Vendor names as reported by the classifiers
pub mod brands {
    pub const APPLE: &str = "Apple";
    pub const SAMSUNG: &str = "Samsung";
}

/// Type allocation code lookup
pub mod tac {
    /// Digits of a full type allocation code
    pub const FULL_LEN: usize = 8;

    /// Shortest prefix stored in the reference table
    pub const MIN_PREFIX_LEN: usize = 6;

    /// Prefix lengths probed, longest first, with the confidence of a hit
    pub const PROBES: &[(usize, u8)] = &[(8, 95), (7, 80), (6, 60)];

    /// Confidence attached to a two-digit heuristic guess
    pub const HEURISTIC_CONFIDENCE: u8 = 40;

    /// Leading pairs with a coarse vendor hint: (pair, brand)
    pub const HEURISTICS: &[(&str, &str)] = &[
        ("35", "Apple/Samsung"),
        ("86", "Budget/regional OEM"),
    ];
}

/// Scan type detection
pub mod scan {
    pub const CONFIDENCE_VALID_IDENTIFIER: u8 = 100;
    pub const CONFIDENCE_BAD_CHECKSUM: u8 = 70;
    pub const CONFIDENCE_TRAILING_DIGIT: u8 = 80;
    pub const CONFIDENCE_MISSING_CHECK_DIGIT: u8 = 70;
    pub const CONFIDENCE_SERIAL: u8 = 85;
    pub const CONFIDENCE_UNRECOGNIZED: u8 = 30;
}

/// Suspicion composition
pub mod suspicion {
    /// A resolution must be strictly more confident than this to count
    pub const BRAND_CONFIDENCE_THRESHOLD: u8 = 50;

    /// Length of a leading run of repeated digits that is always suspicious
    pub const REPEATED_RUN_LEN: usize = 5;

    /// Digits whose leading runs are checked
    pub const REPEATED_DIGITS: &[char] = &['0', '1'];

    /// Literal prefixes of identifiers known to be fabricated
    pub const FAKE_PREFIXES: &[&str] = &["00000000", "12345678", "99999999"];
}
