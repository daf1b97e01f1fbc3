//! SQLite UserStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, OnConflict, Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use crate::model::{User, UserId};
use crate::storage::schema::{Users, CREATE_USERS_TABLE};
use crate::storage::{Result, StorageError, UserStore};

/// SQLite implementation of UserStore.
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    /// Create a new SQLite user store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the table if it does not exist.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert or update a user under its own id.
    pub async fn put(&self, user: &User) -> Result<()> {
        let query = Query::insert()
            .into_table(Users::Table)
            .columns([Users::Id, Users::LoginName])
            .values_panic([user.id.into(), user.login_name.clone().into()])
            .on_conflict(
                OnConflict::column(Users::Id)
                    .update_column(Users::LoginName)
                    .to_owned(),
            )
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get_by_id(&self, id: UserId) -> Result<User> {
        let query = Query::select()
            .columns([Users::Id, Users::LoginName])
            .from(Users::Table)
            .and_where(Expr::col(Users::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("User", id))?;

        Ok(User {
            id: row.try_get("id")?,
            login_name: row.try_get("login_name")?,
        })
    }
}
