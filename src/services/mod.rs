//! Business services.

pub mod review;

pub use review::{errmsg, ReviewError, ReviewService};
