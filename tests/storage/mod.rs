//! Shared storage integration tests.
//!
//! Tests the ReviewStore interface against all implementations.
//! Each implementation module imports these test functions and runs them.

pub mod review_store_tests;
