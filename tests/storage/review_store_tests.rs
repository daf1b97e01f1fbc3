//! ReviewStore interface tests.
//!
//! These tests verify the contract of the ReviewStore trait.
//! Each storage implementation should run these tests. Every test uses its
//! own POS id so they can share one store; callers must make POS 10..=14
//! and users 1..=3 resolvable where the backend enforces references.

use pos_reviews::storage::{ReviewStore, StorageError};
use pos_reviews::Review;

// =============================================================================
// ReviewStore::upsert (insert) tests
// =============================================================================

pub async fn test_insert_assigns_identity<S: ReviewStore>(store: &S) {
    let saved = store
        .upsert(Review::new(10, 1, "Smooth flat white"))
        .await
        .expect("insert should succeed");

    let id = saved.id.expect("insert should assign an id");
    assert!(saved.created_at.is_some(), "insert should set created_at");
    assert_eq!(saved.created_at, saved.updated_at);
    assert_eq!(saved.approval_count, 0);

    let fetched = store.get_by_id(id).await.expect("get should succeed");
    assert_eq!(fetched, saved, "stored review should round-trip exactly");
}

pub async fn test_get_nonexistent<S: ReviewStore>(store: &S) {
    let result = store.get_by_id(987_654).await;
    assert!(
        matches!(result, Err(StorageError::NotFound { entity: "Review", id: 987_654 })),
        "missing review should be NotFound, got {result:?}"
    );
}

pub async fn test_insert_duplicate_pair<S: ReviewStore>(store: &S) {
    store.upsert(Review::new(11, 1, "first")).await.unwrap();

    let result = store.upsert(Review::new(11, 1, "second")).await;
    assert!(
        matches!(
            result,
            Err(StorageError::Duplicate {
                pos_id: 11,
                author_id: 1
            })
        ),
        "second review for the same pair should be Duplicate, got {result:?}"
    );
    assert_eq!(store.filter_by_author(11, 1).await.unwrap().len(), 1);
}

pub async fn test_insert_requires_references<S: ReviewStore>(store: &S) {
    let mut review = Review::new(10, 1, "orphan");
    review.pos_id = None;

    let result = store.upsert(review).await;
    assert!(matches!(result, Err(StorageError::MissingField("pos_id"))));
}

// =============================================================================
// ReviewStore::upsert (update) tests
// =============================================================================

pub async fn test_update_compare_and_swap<S: ReviewStore>(store: &S) {
    let saved = store.upsert(Review::new(12, 1, "before")).await.unwrap();
    let id = saved.id.unwrap();

    let mut next = saved.clone();
    next.approval_count = 1;
    next.approved = true;
    let updated = store.upsert(next).await.expect("fresh copy should update");
    assert_eq!(updated.approval_count, 1);
    assert!(updated.approved);
    assert_eq!(updated.created_at, saved.created_at);
    assert!(updated.updated_at > saved.updated_at, "update should advance updated_at");

    let mut stale = saved.clone();
    stale.approval_count = 1;
    let result = store.upsert(stale).await;
    assert!(
        matches!(result, Err(StorageError::Conflict { id: conflict }) if conflict == id),
        "stale copy should conflict, got {result:?}"
    );

    let stored = store.get_by_id(id).await.unwrap();
    assert_eq!(stored, updated, "conflicting write should leave the row untouched");
}

pub async fn test_update_nonexistent<S: ReviewStore>(store: &S) {
    let mut review = Review::new(12, 2, "ghost");
    review.id = Some(987_654);

    let result = store.upsert(review).await;
    assert!(
        matches!(result, Err(StorageError::NotFound { .. })),
        "update of a missing review should be NotFound, got {result:?}"
    );
}

// =============================================================================
// ReviewStore filter tests
// =============================================================================

pub async fn test_filters_in_insertion_order<S: ReviewStore>(store: &S) {
    let mut ids = Vec::new();
    for author in [3, 1, 2] {
        let saved = store.upsert(Review::new(13, author, "text")).await.unwrap();
        ids.push(saved.id.unwrap());
    }

    let mut approved = store.get_by_id(ids[1]).await.unwrap();
    approved.approval_count = 2;
    approved.approved = true;
    store.upsert(approved).await.unwrap();

    let pending: Vec<_> = store
        .filter_by_approval(13, 2, false)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id.unwrap())
        .collect();
    assert_eq!(pending, vec![ids[0], ids[2]]);

    let approved: Vec<_> = store
        .filter_by_approval(13, 2, true)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id.unwrap())
        .collect();
    assert_eq!(approved, vec![ids[1]]);

    // The stored flag says approved, but 2 approvals are short of a quorum of 3.
    let pending_at_three: Vec<_> = store
        .filter_by_approval(13, 3, false)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.id.unwrap())
        .collect();
    assert_eq!(pending_at_three, ids);
    assert!(store.filter_by_approval(13, 3, true).await.unwrap().is_empty());

    let by_author = store.filter_by_author(13, 2).await.unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].id, Some(ids[2]));

    let all: Vec<_> = store
        .get_all()
        .await
        .unwrap()
        .into_iter()
        .filter_map(|r| r.id)
        .collect();
    for id in &ids {
        assert!(all.contains(id), "get_all should include review {id}");
    }
}

// =============================================================================
// ReviewStore::delete tests
// =============================================================================

pub async fn test_delete<S: ReviewStore>(store: &S) {
    let saved = store.upsert(Review::new(14, 1, "short-lived")).await.unwrap();
    let id = saved.id.unwrap();

    store.delete(id).await.expect("delete should succeed");

    assert!(matches!(
        store.get_by_id(id).await,
        Err(StorageError::NotFound { .. })
    ));
    assert!(matches!(
        store.delete(id).await,
        Err(StorageError::NotFound { .. })
    ));

    // The pair is free again once the review is gone.
    store
        .upsert(Review::new(14, 1, "second attempt"))
        .await
        .expect("pair should be reusable after delete");
}

// =============================================================================
// Test runner macro
// =============================================================================

/// Run all ReviewStore interface tests against a store implementation.
#[macro_export]
macro_rules! run_review_store_tests {
    ($store:expr) => {
        use $crate::storage::review_store_tests::*;

        test_insert_assigns_identity($store).await;
        println!("  test_insert_assigns_identity: PASSED");

        test_get_nonexistent($store).await;
        println!("  test_get_nonexistent: PASSED");

        test_insert_duplicate_pair($store).await;
        println!("  test_insert_duplicate_pair: PASSED");

        test_insert_requires_references($store).await;
        println!("  test_insert_requires_references: PASSED");

        test_update_compare_and_swap($store).await;
        println!("  test_update_compare_and_swap: PASSED");

        test_update_nonexistent($store).await;
        println!("  test_update_nonexistent: PASSED");

        test_filters_in_insertion_order($store).await;
        println!("  test_filters_in_insertion_order: PASSED");

        test_delete($store).await;
        println!("  test_delete: PASSED");
    };
}
