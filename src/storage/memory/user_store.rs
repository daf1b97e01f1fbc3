//! In-memory UserStore implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::{User, UserId};
use crate::storage::{Result, StorageError, UserStore};

/// In-memory user store.
#[derive(Default)]
pub struct InMemoryUserStore {
    rows: RwLock<BTreeMap<UserId, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user under its own id.
    pub async fn put(&self, user: User) {
        self.rows.write().await.insert(user.id, user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get_by_id(&self, id: UserId) -> Result<User> {
        self.rows
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StorageError::not_found("User", id))
    }
}
