//! In-memory storage implementations.
//!
//! Used by the `memory` storage backend and throughout the tests. Semantics
//! match the SQLite stores: insertion-ordered listings, a unique
//! (POS, author) pair, and compare-and-swap review updates.

mod pos_store;
mod review_store;
mod user_store;

pub use pos_store::InMemoryPosStore;
pub use review_store::InMemoryReviewStore;
pub use user_store::InMemoryUserStore;
