//! User lookup interface.

use async_trait::async_trait;

use super::review_store::Result;
use crate::model::{User, UserId};

/// Read access to users.
///
/// Fails with `StorageError::NotFound` when the id does not resolve.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_id(&self, id: UserId) -> Result<User>;
}
