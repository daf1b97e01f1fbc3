//! Point-of-sale lookup interface.

use async_trait::async_trait;

use super::review_store::Result;
use crate::model::{Pos, PosId};

/// Read access to points of sale.
///
/// Fails with `StorageError::NotFound` when the id does not resolve.
#[async_trait]
pub trait PosStore: Send + Sync {
    async fn get_by_id(&self, id: PosId) -> Result<Pos>;
}
