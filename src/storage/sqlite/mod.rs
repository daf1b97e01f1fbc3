//! SQLite implementations of storage interfaces.

mod pos_store;
mod review_store;
mod user_store;

pub use pos_store::SqlitePosStore;
pub use review_store::SqliteReviewStore;
pub use user_store::SqliteUserStore;
