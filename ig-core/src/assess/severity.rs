//! Severity grading
//!
//! Severity only ever rises while findings accumulate; `Findings` keeps the
//! level private so no caller can lower it.

use serde::{Deserialize, Serialize};

use crate::data::SuspicionReport;

/// Ordered suspicion level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    /// The higher of the two levels
    pub fn escalate(self, other: Severity) -> Severity {
        self.max(other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons collected so far plus the highest severity seen
#[derive(Debug, Clone, Default)]
pub struct Findings {
    reasons: Vec<String>,
    severity: Severity,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a reason and raise the severity to at least `severity`
    pub fn flag(&mut self, reason: impl Into<String>, severity: Severity) {
        self.reasons.push(reason.into());
        self.severity = self.severity.escalate(severity);
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn into_report(self) -> SuspicionReport {
        SuspicionReport {
            is_suspicious: !self.reasons.is_empty(),
            reasons: self.reasons,
            severity: self.severity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert_eq!(Severity::High.escalate(Severity::Low), Severity::High);
        assert_eq!(Severity::Low.escalate(Severity::Medium), Severity::Medium);
    }

    #[test]
    fn test_findings_never_downgrade() {
        let mut findings = Findings::new();
        assert_eq!(findings.severity(), Severity::Low);
        findings.flag("bad checksum", Severity::High);
        findings.flag("brand differs", Severity::Medium);
        findings.flag("note", Severity::Low);
        let report = findings.into_report();
        assert!(report.is_suspicious);
        assert_eq!(report.severity, Severity::High);
        assert_eq!(report.reasons.len(), 3);
    }

    #[test]
    fn test_empty_findings_are_clean() {
        assert_eq!(Findings::new().into_report(), SuspicionReport::clean());
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
    }
}
