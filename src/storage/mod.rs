//! Storage implementations.

use std::sync::Arc;

use tracing::info;

use crate::config::{StorageConfig, StorageType};

pub use crate::interfaces::{PosStore, Result, ReviewStore, StorageError, UserStore};

pub mod helpers;
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use memory::{InMemoryPosStore, InMemoryReviewStore, InMemoryUserStore};

#[cfg(feature = "sqlite")]
pub use sqlite::{SqlitePosStore, SqliteReviewStore, SqliteUserStore};

/// The collaborators the review workflow reads and writes through.
#[derive(Clone)]
pub struct Stores {
    pub pos: Arc<dyn PosStore>,
    pub users: Arc<dyn UserStore>,
    pub reviews: Arc<dyn ReviewStore>,
}

impl Stores {
    /// Empty in-memory stores.
    pub fn in_memory() -> Self {
        Self {
            pos: Arc::new(InMemoryPosStore::new()),
            users: Arc::new(InMemoryUserStore::new()),
            reviews: Arc::new(InMemoryReviewStore::new()),
        }
    }
}

/// Initialize storage based on configuration.
///
/// Returns the POS, user, and review stores for the configured backend,
/// with any schema already created.
pub async fn init_storage(
    config: &StorageConfig,
) -> std::result::Result<Stores, Box<dyn std::error::Error>> {
    info!("Storage: {}", config.storage_type);

    match config.storage_type {
        StorageType::Memory => Ok(Stores::in_memory()),
        #[cfg(feature = "sqlite")]
        StorageType::Sqlite => {
            let path = &config.sqlite.path;
            if let Some(parent) = std::path::Path::new(path).parent() {
                std::fs::create_dir_all(parent)?;
            }
            info!(path = %path, "Opening SQLite database");

            let pool = sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", path)).await?;

            let pos = SqlitePosStore::new(pool.clone());
            pos.init().await?;
            let users = SqliteUserStore::new(pool.clone());
            users.init().await?;
            let reviews = SqliteReviewStore::new(pool);
            reviews.init().await?;

            Ok(Stores {
                pos: Arc::new(pos),
                users: Arc::new(users),
                reviews: Arc::new(reviews),
            })
        }
        #[cfg(not(feature = "sqlite"))]
        StorageType::Sqlite => {
            tracing::error!("SQLite storage requested but 'sqlite' feature is not enabled");
            Err("SQLite feature not enabled".into())
        }
    }
}
