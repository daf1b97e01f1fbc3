//! Quorum policy: how many approvals make a review approved.

use crate::config::{ApprovalConfig, ConfigError};

/// Minimum approval count at or above which a review is approved.
///
/// Loaded once at startup and handed to the workflow; there is no
/// per-POS or per-review override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuorumPolicy {
    min_count: u32,
}

impl QuorumPolicy {
    /// A zero threshold would approve reviews at creation, so it is rejected.
    pub fn new(min_count: u32) -> Result<Self, ConfigError> {
        if min_count == 0 {
            return Err(ConfigError::InvalidMinCount(min_count));
        }
        Ok(Self { min_count })
    }

    pub fn from_config(config: &ApprovalConfig) -> Result<Self, ConfigError> {
        Self::new(config.min_count)
    }

    pub fn min_count(&self) -> u32 {
        self.min_count
    }

    pub fn is_approved(&self, approval_count: u32) -> bool {
        approval_count >= self.min_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_threshold_is_not_approved() {
        let policy = QuorumPolicy::new(3).unwrap();
        assert!(!policy.is_approved(0));
        assert!(!policy.is_approved(2));
    }

    #[test]
    fn test_at_or_above_threshold_is_approved() {
        let policy = QuorumPolicy::new(3).unwrap();
        assert!(policy.is_approved(3));
        assert!(policy.is_approved(42));
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let err = QuorumPolicy::new(0).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMinCount(0)));
    }

    #[test]
    fn test_from_config() {
        let policy = QuorumPolicy::from_config(&ApprovalConfig { min_count: 5 }).unwrap();
        assert_eq!(policy.min_count(), 5);
    }
}
