//! Domain entities: points of sale, users, and the reviews linking them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persistence-assigned point-of-sale identifier.
pub type PosId = i64;
/// Persistence-assigned user identifier.
pub type UserId = i64;
/// Persistence-assigned review identifier.
pub type ReviewId = i64;

/// A point of sale that can be reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pos {
    pub id: PosId,
    pub name: String,
}

/// A registered user; authors and approvers are both users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub login_name: String,
}

/// Approval lifecycle of a review.
///
/// `Approved` is terminal: nothing decrements the approval count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalState {
    Pending,
    Approved,
}

/// One user's review of one point of sale.
///
/// `id` and the timestamps are absent until the review store persists it.
/// `approved` is derived from `approval_count` and the quorum policy and is
/// recomputed by the workflow on every write.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Review {
    pub id: Option<ReviewId>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub pos_id: Option<PosId>,
    pub author_id: Option<UserId>,
    pub review: String,
    pub approval_count: u32,
    pub approved: bool,
}

impl Review {
    /// Build an unsaved review with no approvals.
    pub fn new(pos_id: PosId, author_id: UserId, review: impl Into<String>) -> Self {
        Self {
            pos_id: Some(pos_id),
            author_id: Some(author_id),
            review: review.into(),
            ..Self::default()
        }
    }

    pub fn state(&self) -> ApprovalState {
        if self.approved {
            ApprovalState::Approved
        } else {
            ApprovalState::Pending
        }
    }

    /// True once the review store has assigned an identifier.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}
