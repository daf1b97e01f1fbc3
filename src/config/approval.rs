//! Approval quorum configuration.

use serde::Deserialize;

/// Approval configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApprovalConfig {
    /// Approvals needed before a review counts as approved.
    /// Default: 3
    pub min_count: u32,
}

impl Default for ApprovalConfig {
    fn default() -> Self {
        Self { min_count: 3 }
    }
}
