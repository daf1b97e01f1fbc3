//! In-memory ReviewStore implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{PosId, Review, ReviewId, UserId};
use crate::storage::helpers::{next_timestamp, review_refs};
use crate::storage::{Result, ReviewStore, StorageError};

#[derive(Default)]
struct ReviewTable {
    /// Keyed by id; ids only grow, so iteration order is insertion order.
    rows: BTreeMap<ReviewId, Review>,
    last_id: ReviewId,
}

impl ReviewTable {
    fn find_pair(&self, pos_id: PosId, author_id: UserId) -> Option<&Review> {
        self.rows
            .values()
            .find(|r| r.pos_id == Some(pos_id) && r.author_id == Some(author_id))
    }
}

/// In-memory review store.
#[derive(Default)]
pub struct InMemoryReviewStore {
    table: RwLock<ReviewTable>,
    fail_on_upsert: RwLock<bool>,
}

impl InMemoryReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `upsert` fail, to exercise error propagation.
    pub async fn set_fail_on_upsert(&self, fail: bool) {
        *self.fail_on_upsert.write().await = fail;
    }

    pub async fn stored_count(&self) -> usize {
        self.table.read().await.rows.len()
    }

    fn select<F>(table: &ReviewTable, predicate: F) -> Vec<Review>
    where
        F: Fn(&Review) -> bool,
    {
        table.rows.values().filter(|r| predicate(r)).cloned().collect()
    }
}

#[async_trait]
impl ReviewStore for InMemoryReviewStore {
    async fn get_by_id(&self, id: ReviewId) -> Result<Review> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("Review", id))
    }

    async fn get_all(&self) -> Result<Vec<Review>> {
        let table = self.table.read().await;
        Ok(Self::select(&table, |_| true))
    }

    async fn filter_by_author(&self, pos_id: PosId, author_id: UserId) -> Result<Vec<Review>> {
        let table = self.table.read().await;
        Ok(Self::select(&table, |r| {
            r.pos_id == Some(pos_id) && r.author_id == Some(author_id)
        }))
    }

    async fn filter_by_approval(
        &self,
        pos_id: PosId,
        min_count: u32,
        approved: bool,
    ) -> Result<Vec<Review>> {
        let table = self.table.read().await;
        Ok(Self::select(&table, |r| {
            r.pos_id == Some(pos_id) && (r.approval_count >= min_count) == approved
        }))
    }

    async fn upsert(&self, mut review: Review) -> Result<Review> {
        if *self.fail_on_upsert.read().await {
            return Err(StorageError::InvalidValue(
                "upsert disabled for test".to_string(),
            ));
        }

        let (pos_id, author_id) = review_refs(&review)?;
        let mut table = self.table.write().await;

        match review.id {
            None => {
                if table.find_pair(pos_id, author_id).is_some() {
                    return Err(StorageError::Duplicate { pos_id, author_id });
                }
                let now = next_timestamp(None);
                table.last_id += 1;
                let id = table.last_id;
                review.id = Some(id);
                review.created_at = Some(now);
                review.updated_at = Some(now);
                table.rows.insert(id, review.clone());
                Ok(review)
            }
            Some(id) => {
                let stored = table
                    .rows
                    .get(&id)
                    .ok_or_else(|| StorageError::not_found("Review", id))?;
                if stored.updated_at != review.updated_at {
                    return Err(StorageError::Conflict { id });
                }
                let created_at = stored.created_at;
                let previous = stored.updated_at;
                if let Some(other) = table.find_pair(pos_id, author_id) {
                    if other.id != Some(id) {
                        return Err(StorageError::Duplicate { pos_id, author_id });
                    }
                }
                review.created_at = created_at;
                review.updated_at = Some(next_timestamp(previous));
                table.rows.insert(id, review.clone());
                Ok(review)
            }
        }
    }

    async fn delete(&self, id: ReviewId) -> Result<()> {
        self.table
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found("Review", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_id_and_timestamps() {
        let store = InMemoryReviewStore::new();

        let saved = store.upsert(Review::new(10, 1, "Good")).await.unwrap();

        assert_eq!(saved.id, Some(1));
        assert!(saved.created_at.is_some());
        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(store.get_by_id(1).await.unwrap(), saved);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_pair() {
        let store = InMemoryReviewStore::new();
        store.upsert(Review::new(10, 1, "Good")).await.unwrap();

        let result = store.upsert(Review::new(10, 1, "Again")).await;

        assert!(matches!(
            result,
            Err(StorageError::Duplicate {
                pos_id: 10,
                author_id: 1
            })
        ));
        assert_eq!(store.stored_count().await, 1);
    }

    #[tokio::test]
    async fn test_update_with_stale_copy_conflicts() {
        let store = InMemoryReviewStore::new();
        let saved = store.upsert(Review::new(10, 1, "Good")).await.unwrap();

        let mut first = saved.clone();
        first.approval_count = 1;
        let updated = store.upsert(first).await.unwrap();
        assert!(updated.updated_at > saved.updated_at);
        assert_eq!(updated.created_at, saved.created_at);

        let mut stale = saved.clone();
        stale.approval_count = 1;
        let result = store.upsert(stale).await;
        assert!(matches!(result, Err(StorageError::Conflict { id: 1 })));
        assert_eq!(store.get_by_id(1).await.unwrap().approval_count, 1);
    }

    #[tokio::test]
    async fn test_update_missing_review_not_found() {
        let store = InMemoryReviewStore::new();
        let mut review = Review::new(10, 1, "Good");
        review.id = Some(99);

        let result = store.upsert(review).await;
        assert!(matches!(
            result,
            Err(StorageError::NotFound {
                entity: "Review",
                id: 99
            })
        ));
    }

    #[tokio::test]
    async fn test_filters_preserve_insertion_order() {
        let store = InMemoryReviewStore::new();
        for author in [3, 1, 2] {
            store
                .upsert(Review::new(10, author, "text"))
                .await
                .unwrap();
        }
        store.upsert(Review::new(11, 1, "other pos")).await.unwrap();

        let pending = store.filter_by_approval(10, 1, false).await.unwrap();
        let authors: Vec<_> = pending.iter().map(|r| r.author_id.unwrap()).collect();
        assert_eq!(authors, vec![3, 1, 2]);

        assert!(store.filter_by_approval(10, 1, true).await.unwrap().is_empty());
        assert_eq!(store.filter_by_author(11, 1).await.unwrap().len(), 1);
        assert!(store.filter_by_author(11, 2).await.unwrap().is_empty());
        assert_eq!(store.get_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = InMemoryReviewStore::new();
        store.upsert(Review::new(10, 1, "Good")).await.unwrap();

        store.delete(1).await.unwrap();

        assert!(matches!(
            store.get_by_id(1).await,
            Err(StorageError::NotFound { .. })
        ));
        assert!(matches!(
            store.delete(1).await,
            Err(StorageError::NotFound { .. })
        ));
    }
}
