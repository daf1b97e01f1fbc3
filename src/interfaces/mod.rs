//! Abstract interfaces for the review workflow's collaborators.
//!
//! These traits define the contracts for:
//! - Point-of-sale lookup
//! - User lookup
//! - Review persistence

pub mod pos_store;
pub mod review_store;
pub mod user_store;

pub use pos_store::PosStore;
pub use review_store::{Result, ReviewStore, StorageError};
pub use user_store::UserStore;
