//! Engine handle
//!
//! Bundles the reference source with the fake-prefix blacklist. Immutable
//! after construction; clone it freely across threads.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::assess;
use crate::constants::suspicion::FAKE_PREFIXES;
use crate::data::{DeviceIdentifier, IntakeReport, MismatchResult, SuspicionReport, TacResolution};
use crate::tac::{self, TacSource, TacTable};

#[derive(Clone)]
pub struct Engine {
    tac: Arc<dyn TacSource>,
    fake_prefixes: Arc<[String]>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(TacTable::builtin())
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("tac_entries", &self.tac.len())
            .field("fake_prefixes", &self.fake_prefixes)
            .finish()
    }
}

impl Engine {
    /// Engine over `tac` with the fixture blacklist
    pub fn new(tac: Arc<dyn TacSource>) -> Self {
        Self {
            tac,
            fake_prefixes: FAKE_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Add blacklist prefixes on top of the fixture set
    pub fn with_fake_prefixes<I>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut prefixes: Vec<String> = self.fake_prefixes.to_vec();
        for prefix in extra {
            if !prefixes.contains(&prefix) {
                prefixes.push(prefix);
            }
        }
        debug!(count = prefixes.len(), "Fake prefix blacklist configured");
        Self {
            tac: self.tac,
            fake_prefixes: prefixes.into(),
        }
    }

    pub fn tac_source(&self) -> &dyn TacSource {
        self.tac.as_ref()
    }

    pub fn fake_prefixes(&self) -> &[String] {
        &self.fake_prefixes
    }

    pub fn resolve_tac(&self, identifier: &DeviceIdentifier) -> TacResolution {
        tac::resolve_tac(self.tac.as_ref(), identifier.as_str())
    }

    /// Resolve from raw digits that may not form a valid identifier
    pub fn resolve_digits(&self, digits: &str) -> TacResolution {
        tac::resolve_tac(self.tac.as_ref(), digits)
    }

    pub fn assess_device(
        &self,
        identifier: &str,
        serial: Option<&str>,
        claimed_brand: &str,
        claimed_model: &str,
    ) -> SuspicionReport {
        assess::assess_device(
            self.tac.as_ref(),
            &self.fake_prefixes,
            identifier,
            serial,
            claimed_brand,
            claimed_model,
        )
    }

    pub fn detect_mismatch(
        &self,
        identifier: &str,
        claimed_brand: &str,
        claimed_model: &str,
    ) -> MismatchResult {
        assess::detect_mismatch(self.tac.as_ref(), identifier, claimed_brand, claimed_model)
    }

    pub fn inspect(
        &self,
        raw: &str,
        serial: Option<&str>,
        claimed_brand: &str,
        claimed_model: &str,
    ) -> IntakeReport {
        assess::inspect(
            self.tac.as_ref(),
            &self.fake_prefixes,
            raw,
            serial,
            claimed_brand,
            claimed_model,
        )
    }
}
