//! Shared storage helper functions.
//!
//! Timestamp handling and row validation used by every storage backend.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::{PosId, Review, UserId};

use super::{Result, StorageError};

/// Timestamp for a write that follows `previous`.
///
/// Guarantees a strictly later value so `updated_at` always changes on
/// update and compare-and-swap cannot accept a stale copy.
pub fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev => prev + chrono::Duration::nanoseconds(1),
        _ => now,
    }
}

/// Format a timestamp to a fixed-width RFC3339 string.
pub fn timestamp_to_rfc3339(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a stored RFC3339 timestamp.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidTimestamp(format!("{value}: {e}")))
}

/// POS and author references a persisted review must carry.
pub fn review_refs(review: &Review) -> Result<(PosId, UserId)> {
    let pos_id = review.pos_id.ok_or(StorageError::MissingField("pos_id"))?;
    let author_id = review
        .author_id
        .ok_or(StorageError::MissingField("author_id"))?;
    Ok((pos_id, author_id))
}
