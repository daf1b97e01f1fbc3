//! In-memory PosStore implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{Pos, PosId};
use crate::storage::{PosStore, Result, StorageError};

/// In-memory point-of-sale store.
#[derive(Default)]
pub struct InMemoryPosStore {
    rows: RwLock<BTreeMap<PosId, Pos>>,
}

impl InMemoryPosStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a point of sale under its own id.
    pub async fn put(&self, pos: Pos) {
        self.rows.write().await.insert(pos.id, pos);
    }
}

#[async_trait]
impl PosStore for InMemoryPosStore {
    async fn get_by_id(&self, id: PosId) -> Result<Pos> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("POS", id))
    }
}
