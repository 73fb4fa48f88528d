//! Claimed-identity mismatch detection

use tracing::debug;

use super::{conflicting_brand, describe};
use crate::constants::suspicion::BRAND_CONFIDENCE_THRESHOLD;
use crate::data::MismatchResult;
use crate::identity::normalize_identifier;
use crate::matching::model_agrees;
use crate::tac::{resolve_tac, TacSource};

/// Compare the TAC-resolved identity with the operator's claim
///
/// A weak or empty resolution yields "no mismatch": there is not enough
/// signal to say either way.
pub fn detect_mismatch(
    source: &dyn TacSource,
    identifier: &str,
    claimed_brand: &str,
    claimed_model: &str,
) -> MismatchResult {
    let cleaned = normalize_identifier(identifier);
    let resolution = resolve_tac(source, &cleaned);

    if resolution.confidence <= BRAND_CONFIDENCE_THRESHOLD || resolution.brand.is_none() {
        return MismatchResult::none();
    }

    if let Some(brand) = conflicting_brand(&resolution, claimed_brand) {
        let message = format!(
            "IMEI suggests {}, but device was entered as {}",
            describe(brand, resolution.model.as_deref()),
            describe(claimed_brand, Some(claimed_model)),
        );
        debug!(%message, "Brand mismatch");
        return MismatchResult {
            mismatch: true,
            suggested_brand: resolution.brand.clone(),
            suggested_model: resolution.model.clone(),
            message: Some(message),
        };
    }

    if let Some(model) = resolution.model.as_deref() {
        if !model_agrees(model, claimed_model) {
            let message = format!(
                "IMEI suggests model {}, but {} was entered",
                model, claimed_model
            );
            debug!(%message, "Model mismatch");
            return MismatchResult {
                mismatch: true,
                suggested_brand: resolution.brand.clone(),
                suggested_model: resolution.model.clone(),
                message: Some(message),
            };
        }
    }

    MismatchResult::none()
}
