//! Longest-prefix TAC resolution
//!
//! Probes the reference source at 8, 7 and then 6 digits. The first hit wins,
//! with confidence decaying as the prefix shortens. Without a hit, the first
//! two digits give at most a coarse vendor hint.

use tracing::{debug, trace};

use super::table::TacSource;
use crate::constants::tac::{FULL_LEN, HEURISTICS, HEURISTIC_CONFIDENCE, PROBES};
use crate::data::TacResolution;

/// Resolve the identity behind a digit string. Never fails.
///
/// `digits` is normally a cleaned 15-digit identifier; shorter or malformed
/// input simply resolves to less information.
pub fn resolve_tac(source: &dyn TacSource, digits: &str) -> TacResolution {
    let tac = digits.get(..FULL_LEN).unwrap_or(digits);

    for &(len, confidence) in PROBES {
        let Some(prefix) = tac.get(..len) else {
            continue;
        };
        trace!(prefix, "Probing TAC table");

        if let Some(entry) = source.lookup(prefix) {
            debug!(
                prefix,
                brand = %entry.brand,
                model = ?entry.model,
                confidence,
                "TAC resolved from table"
            );
            return TacResolution {
                brand: Some(entry.brand),
                model: entry.model,
                confidence,
                matched_prefix: Some(prefix.to_string()),
            };
        }
    }

    let pair = tac.get(..2).unwrap_or_default();
    match HEURISTICS.iter().find(|(lead, _)| *lead == pair) {
        Some((_, brand)) => {
            debug!(pair, brand, "TAC resolved from leading digits only");
            TacResolution {
                brand: Some(brand.to_string()),
                model: None,
                confidence: HEURISTIC_CONFIDENCE,
                matched_prefix: None,
            }
        }
        None => TacResolution::unknown(),
    }
}
