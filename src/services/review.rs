//! Review approval workflow.
//!
//! Validates new reviews against the one-review-per-author-per-POS rule and
//! drives the approval state machine: every approval by a user other than
//! the author adds one to the count, and the review is approved once the
//! count reaches the quorum policy's threshold.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::{PosId, Review, ReviewId, UserId};
use crate::policy::QuorumPolicy;
use crate::storage::{init_storage, PosStore, ReviewStore, StorageError, Stores, UserStore};

pub mod errmsg {
    pub const POS_REQUIRED: &str = "POS required";
    pub const AUTHOR_REQUIRED: &str = "Author required";
    pub const REVIEW_REQUIRED: &str = "Review text required";
    pub const REVIEW_ID_REQUIRED: &str = "Review id required";
    pub const DUPLICATE_REVIEW: &str = "Duplicate review";
    pub const SELF_APPROVAL: &str = "Self-approval forbidden";
    pub const IMMUTABLE_REFERENCES: &str = "POS and author cannot change";
}

/// Result type for review workflow operations.
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Errors that can occur in the review workflow.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    /// The request breaks a business rule; correct the input and resend.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: id={id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Any other collaborator failure, passed through untouched.
    #[error(transparent)]
    Storage(StorageError),
}

impl ReviewError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ReviewError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ReviewError::NotFound { .. })
    }
}

impl From<StorageError> for ReviewError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { entity, id } => ReviewError::NotFound { entity, id },
            // The store's unique constraint caught a submission that raced the
            // duplicate check.
            StorageError::Duplicate { .. } => {
                ReviewError::Validation(errmsg::DUPLICATE_REVIEW.to_string())
            }
            other => ReviewError::Storage(other),
        }
    }
}

fn rejected(reason: &'static str) -> ReviewError {
    warn!(reason, "Review request rejected");
    ReviewError::Validation(reason.to_string())
}

/// Review workflow service.
///
/// Stateless between calls: all state lives behind the stores, and every
/// validation runs before the single write an operation performs.
pub struct ReviewService {
    pos: Arc<dyn PosStore>,
    users: Arc<dyn UserStore>,
    reviews: Arc<dyn ReviewStore>,
    policy: QuorumPolicy,
}

impl ReviewService {
    pub fn new(stores: Stores, policy: QuorumPolicy) -> Self {
        Self {
            pos: stores.pos,
            users: stores.users,
            reviews: stores.reviews,
            policy,
        }
    }

    /// Build the service from configuration: quorum policy plus storage backend.
    pub async fn from_config(
        config: &Config,
    ) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let policy = QuorumPolicy::from_config(&config.approval)?;
        let stores = init_storage(&config.storage).await?;
        info!(min_count = policy.min_count(), "Review approval quorum configured");
        Ok(Self::new(stores, policy))
    }

    pub fn policy(&self) -> QuorumPolicy {
        self.policy
    }

    /// Set `approved` from the approval count and the quorum policy.
    ///
    /// Pure and idempotent; any incoming `approved` value is discarded.
    pub fn recompute_approval_status(&self, review: Review) -> Review {
        debug!(review_id = ?review.id, "Updating approval status");
        Review {
            approved: self.policy.is_approved(review.approval_count),
            ..review
        }
    }

    /// Create a review after checking references and uniqueness.
    ///
    /// Client-supplied id, timestamps, approval count, and approved flag are
    /// ignored: a new review always starts with no approvals.
    pub async fn submit_review(&self, review: Review) -> Result<Review> {
        info!(
            pos_id = ?review.pos_id,
            author_id = ?review.author_id,
            "Submitting review"
        );

        let pos_id = review.pos_id.ok_or_else(|| rejected(errmsg::POS_REQUIRED))?;
        let author_id = review
            .author_id
            .ok_or_else(|| rejected(errmsg::AUTHOR_REQUIRED))?;
        if review.review.trim().is_empty() {
            return Err(rejected(errmsg::REVIEW_REQUIRED));
        }

        self.pos.get_by_id(pos_id).await?;
        self.users.get_by_id(author_id).await?;

        if !self
            .reviews
            .filter_by_author(pos_id, author_id)
            .await?
            .is_empty()
        {
            return Err(rejected(errmsg::DUPLICATE_REVIEW));
        }

        let fresh = self.recompute_approval_status(Review {
            pos_id: Some(pos_id),
            author_id: Some(author_id),
            review: review.review,
            ..Review::default()
        });

        let saved = self.reviews.upsert(fresh).await?;
        info!(review_id = ?saved.id, pos_id, author_id, "Review created");
        Ok(saved)
    }

    /// Record one approval of `review` by `user_id`.
    ///
    /// The stored review is re-read; the caller's copy only supplies the id.
    /// The same user approving twice counts twice.
    pub async fn approve(&self, review: &Review, user_id: UserId) -> Result<Review> {
        info!(review_id = ?review.id, user_id, "Processing approval request");

        let review_id = review
            .id
            .ok_or_else(|| rejected(errmsg::REVIEW_ID_REQUIRED))?;

        let user = self.users.get_by_id(user_id).await?;
        let persisted = self.reviews.get_by_id(review_id).await?;

        if persisted.author_id == Some(user.id) {
            return Err(rejected(errmsg::SELF_APPROVAL));
        }

        let was_approved = self.policy.is_approved(persisted.approval_count);
        let approval_count = persisted.approval_count.checked_add(1).ok_or_else(|| {
            StorageError::InvalidValue(format!("approval_count overflow on review {review_id}"))
        })?;
        let updated = self.recompute_approval_status(Review {
            approval_count,
            ..persisted
        });

        let saved = self.reviews.upsert(updated).await?;
        if saved.approved && !was_approved {
            info!(
                review_id,
                approval_count = saved.approval_count,
                "Review reached approval quorum"
            );
        }
        Ok(saved)
    }

    /// Reviews of a POS in the given approval state under this service's quorum.
    pub async fn filter_by_pos_and_approval(
        &self,
        pos_id: PosId,
        approved: bool,
    ) -> Result<Vec<Review>> {
        let pos = self.pos.get_by_id(pos_id).await?;
        let reviews = self
            .reviews
            .filter_by_approval(pos.id, self.policy.min_count(), approved)
            .await?;
        Ok(self.recompute_all(reviews))
    }

    pub async fn get_all(&self) -> Result<Vec<Review>> {
        let reviews = self.reviews.get_all().await?;
        Ok(self.recompute_all(reviews))
    }

    pub async fn get_by_id(&self, id: ReviewId) -> Result<Review> {
        let review = self.reviews.get_by_id(id).await?;
        Ok(self.recompute_approval_status(review))
    }

    fn recompute_all(&self, reviews: Vec<Review>) -> Vec<Review> {
        reviews
            .into_iter()
            .map(|r| self.recompute_approval_status(r))
            .collect()
    }

    /// Replace the text of an existing review.
    ///
    /// POS and author are fixed at creation; approval count is kept and the
    /// approved flag recomputed.
    pub async fn update_review(&self, id: ReviewId, review: Review) -> Result<Review> {
        info!(review_id = id, "Updating review");

        if review.review.trim().is_empty() {
            return Err(rejected(errmsg::REVIEW_REQUIRED));
        }

        let stored = self.reviews.get_by_id(id).await?;
        let moves_pos = review.pos_id.is_some() && review.pos_id != stored.pos_id;
        let moves_author = review.author_id.is_some() && review.author_id != stored.author_id;
        if moves_pos || moves_author {
            return Err(rejected(errmsg::IMMUTABLE_REFERENCES));
        }

        let updated = self.recompute_approval_status(Review {
            review: review.review,
            ..stored
        });
        Ok(self.reviews.upsert(updated).await?)
    }

    pub async fn delete(&self, id: ReviewId) -> Result<()> {
        info!(review_id = id, "Deleting review");
        Ok(self.reviews.delete(id).await?)
    }
}
