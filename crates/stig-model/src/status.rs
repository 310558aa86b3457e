//! Review status of a checklist rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Review status as written in the CKLB `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleStatus {
    NotReviewed,
    NotApplicable,
    Open,
    NotAFinding,
}

impl RuleStatus {
    pub const ALL: [RuleStatus; 4] = [
        RuleStatus::NotReviewed,
        RuleStatus::NotApplicable,
        RuleStatus::Open,
        RuleStatus::NotAFinding,
    ];

    /// Returns the value used in CKLB documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleStatus::NotReviewed => "not_reviewed",
            RuleStatus::NotApplicable => "not_applicable",
            RuleStatus::Open => "open",
            RuleStatus::NotAFinding => "not_a_finding",
        }
    }
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleStatus {
    type Err = ModelError;

    /// Exact match only; CKLB status values are lowercase snake case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ModelError::InvalidStatus(s.to_string()))
    }
}
