//! In-memory storage contract tests.
//!
//! Run with: cargo test --test storage_memory

mod storage;

use pos_reviews::storage::InMemoryReviewStore;

#[tokio::test]
async fn test_memory_review_store() {
    println!("=== In-memory ReviewStore Tests ===");

    let store = InMemoryReviewStore::new();
    run_review_store_tests!(&store);

    println!("=== All in-memory ReviewStore tests PASSED ===");
}
