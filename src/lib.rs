//! POS reviews - peer-approved reviews of points of sale.
//!
//! Users write one review per point of sale; other users approve it, and a
//! review becomes approved once it collects the configured quorum of
//! approvals. Authors cannot approve their own reviews.

pub mod config;
pub mod interfaces;
pub mod model;
pub mod policy;
pub mod services;
pub mod storage;
pub mod utils;

pub use model::{ApprovalState, Pos, PosId, Review, ReviewId, User, UserId};
pub use policy::QuorumPolicy;
pub use services::{ReviewError, ReviewService};
