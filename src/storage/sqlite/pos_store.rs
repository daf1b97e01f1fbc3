//! SQLite PosStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, OnConflict, Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use crate::model::{Pos, PosId};
use crate::storage::schema::{PointsOfSale, CREATE_POS_TABLE};
use crate::storage::{PosStore, Result, StorageError};

/// SQLite implementation of PosStore.
pub struct SqlitePosStore {
    pool: SqlitePool,
}

impl SqlitePosStore {
    /// Create a new SQLite point-of-sale store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the table if it does not exist.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_POS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Insert or rename a point of sale under its own id.
    pub async fn put(&self, pos: &Pos) -> Result<()> {
        let query = Query::insert()
            .into_table(PointsOfSale::Table)
            .columns([PointsOfSale::Id, PointsOfSale::Name])
            .values_panic([pos.id.into(), pos.name.clone().into()])
            .on_conflict(
                OnConflict::column(PointsOfSale::Id)
                    .update_column(PointsOfSale::Name)
                    .to_owned(),
            )
            .to_string(SqliteQueryBuilder);

        sqlx::query(&query).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl PosStore for SqlitePosStore {
    async fn get_by_id(&self, id: PosId) -> Result<Pos> {
        let query = Query::select()
            .columns([PointsOfSale::Id, PointsOfSale::Name])
            .from(PointsOfSale::Table)
            .and_where(Expr::col(PointsOfSale::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("POS", id))?;

        Ok(Pos {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
        })
    }
}
