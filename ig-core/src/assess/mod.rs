//! Verdicts composed from the identity checks
//!
//! - `composer` - full suspicion report with graded severity
//! - `mismatch` - narrow "does the claim match the TAC" answer
//! - `intake` - scan-first pipeline used at trade-in and inventory add

mod composer;
mod intake;
mod mismatch;
mod severity;

pub use composer::assess_device;
pub use intake::inspect;
pub use mismatch::detect_mismatch;
pub use severity::{Findings, Severity};

use crate::constants::suspicion::BRAND_CONFIDENCE_THRESHOLD;
use crate::data::TacResolution;
use crate::matching::brands_agree;

/// "Brand Model", or just the brand
fn describe(brand: &str, model: Option<&str>) -> String {
    match model.map(str::trim).filter(|m| !m.is_empty()) {
        Some(model) => format!("{} {}", brand, model),
        None => brand.to_string(),
    }
}

/// The resolved brand, if confident enough and in disagreement with the claim
fn conflicting_brand<'a>(resolution: &'a TacResolution, claimed_brand: &str) -> Option<&'a str> {
    if resolution.confidence <= BRAND_CONFIDENCE_THRESHOLD {
        return None;
    }
    resolution
        .brand
        .as_deref()
        .filter(|brand| !brands_agree(brand, claimed_brand))
}
