//! Review storage interface.

use async_trait::async_trait;

use crate::model::{PosId, Review, ReviewId, UserId};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{entity} not found: id={id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("Concurrent modification of review {id}")]
    Conflict { id: ReviewId },

    #[error("Review already exists: pos={pos_id}, author={author_id}")]
    Duplicate { pos_id: PosId, author_id: UserId },

    #[error("Review is missing {0}")]
    MissingField(&'static str),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid stored value: {0}")]
    InvalidValue(String),

    #[cfg(feature = "sqlite")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        StorageError::NotFound { entity, id }
    }
}

/// Interface for review persistence.
///
/// Listing methods return reviews in insertion order.
///
/// Implementations:
/// - `InMemoryReviewStore`: process-local maps
/// - `SqliteReviewStore`: SQLite storage
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Retrieve a review by identifier.
    async fn get_by_id(&self, id: ReviewId) -> Result<Review>;

    /// Retrieve every stored review.
    async fn get_all(&self) -> Result<Vec<Review>>;

    /// Reviews of a POS written by one author. Empty means no duplicate.
    async fn filter_by_author(&self, pos_id: PosId, author_id: UserId) -> Result<Vec<Review>>;

    /// Reviews of a POS that are (or are not) at the quorum `min_count`.
    ///
    /// Matches on the stored approval count, never on the stored `approved`
    /// flag, which may have been written under a different quorum.
    async fn filter_by_approval(
        &self,
        pos_id: PosId,
        min_count: u32,
        approved: bool,
    ) -> Result<Vec<Review>>;

    /// Insert or update a review.
    ///
    /// Without an id the review is inserted: the store assigns the id and
    /// both timestamps, and rejects a second review for the same
    /// (POS, author) pair with `Duplicate`.
    ///
    /// With an id the stored row is replaced only if its `updated_at` still
    /// equals the caller's `updated_at`; otherwise `Conflict` is returned so
    /// a concurrent write is never silently overwritten.
    async fn upsert(&self, review: Review) -> Result<Review>;

    /// Delete a review.
    async fn delete(&self, id: ReviewId) -> Result<()>;
}
