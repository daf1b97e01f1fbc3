//! SQLite ReviewStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::model::{PosId, Review, ReviewId, UserId};
use crate::storage::helpers::{next_timestamp, parse_timestamp, review_refs, timestamp_to_rfc3339};
use crate::storage::schema::{Reviews, CREATE_REVIEWS_POS_INDEX, CREATE_REVIEWS_TABLE};
use crate::storage::{Result, ReviewStore, StorageError};

/// SQLite implementation of ReviewStore.
///
/// Updates are conditional on the stored `updated_at`, so two writers that
/// read the same version cannot both commit.
pub struct SqliteReviewStore {
    pool: SqlitePool,
}

impl SqliteReviewStore {
    /// Create a new SQLite review store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the table and its index if they do not exist.
    pub async fn init(&self) -> Result<()> {
        sqlx::query(CREATE_REVIEWS_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_REVIEWS_POS_INDEX)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    fn select_reviews() -> SelectStatement {
        Query::select()
            .columns([
                Reviews::Id,
                Reviews::CreatedAt,
                Reviews::UpdatedAt,
                Reviews::PosId,
                Reviews::AuthorId,
                Reviews::Review,
                Reviews::ApprovalCount,
                Reviews::Approved,
            ])
            .from(Reviews::Table)
            .order_by(Reviews::Id, Order::Asc)
            .to_owned()
    }

    async fn fetch_all(&self, query: &str) -> Result<Vec<Review>> {
        let rows = sqlx::query(query).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_review).collect()
    }

    async fn insert(&self, mut review: Review, pos_id: PosId, author_id: UserId) -> Result<Review> {
        let now = next_timestamp(None);
        let ts = timestamp_to_rfc3339(&now);

        let query = Query::insert()
            .into_table(Reviews::Table)
            .columns([
                Reviews::CreatedAt,
                Reviews::UpdatedAt,
                Reviews::PosId,
                Reviews::AuthorId,
                Reviews::Review,
                Reviews::ApprovalCount,
                Reviews::Approved,
            ])
            .values_panic([
                ts.clone().into(),
                ts.into(),
                pos_id.into(),
                author_id.into(),
                review.review.clone().into(),
                review.approval_count.into(),
                review.approved.into(),
            ])
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| unique_violation(e, pos_id, author_id))?;

        review.id = Some(result.last_insert_rowid());
        review.created_at = Some(now);
        review.updated_at = Some(now);
        Ok(review)
    }

    async fn update(
        &self,
        id: ReviewId,
        review: Review,
        pos_id: PosId,
        author_id: UserId,
    ) -> Result<Review> {
        // A copy that never came from the store cannot match any version.
        let Some(expected) = review.updated_at else {
            self.get_by_id(id).await?;
            return Err(StorageError::Conflict { id });
        };
        let updated_at = next_timestamp(Some(expected));

        let query = Query::update()
            .table(Reviews::Table)
            .value(Reviews::PosId, pos_id)
            .value(Reviews::AuthorId, author_id)
            .value(Reviews::Review, review.review.clone())
            .value(Reviews::ApprovalCount, review.approval_count)
            .value(Reviews::Approved, review.approved)
            .value(Reviews::UpdatedAt, timestamp_to_rfc3339(&updated_at))
            .and_where(Expr::col(Reviews::Id).eq(id))
            .and_where(Expr::col(Reviews::UpdatedAt).eq(timestamp_to_rfc3339(&expected)))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| unique_violation(e, pos_id, author_id))?;

        if result.rows_affected() == 0 {
            // Either the row is gone (NotFound) or someone else wrote first.
            self.get_by_id(id).await?;
            return Err(StorageError::Conflict { id });
        }

        self.get_by_id(id).await
    }
}

fn unique_violation(error: sqlx::Error, pos_id: PosId, author_id: UserId) -> StorageError {
    match error {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            StorageError::Duplicate { pos_id, author_id }
        }
        other => StorageError::Database(other),
    }
}

fn row_to_review(row: &SqliteRow) -> Result<Review> {
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;
    let approval_count: i64 = row.try_get("approval_count")?;
    let approval_count = u32::try_from(approval_count)
        .map_err(|_| StorageError::InvalidValue(format!("approval_count={approval_count}")))?;

    Ok(Review {
        id: Some(row.try_get("id")?),
        created_at: Some(parse_timestamp(&created_at)?),
        updated_at: Some(parse_timestamp(&updated_at)?),
        pos_id: Some(row.try_get("pos_id")?),
        author_id: Some(row.try_get("author_id")?),
        review: row.try_get("review")?,
        approval_count,
        approved: row.try_get("approved")?,
    })
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn get_by_id(&self, id: ReviewId) -> Result<Review> {
        let query = Self::select_reviews()
            .and_where(Expr::col(Reviews::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StorageError::not_found("Review", id))?;

        row_to_review(&row)
    }

    async fn get_all(&self) -> Result<Vec<Review>> {
        let query = Self::select_reviews().to_string(SqliteQueryBuilder);
        self.fetch_all(&query).await
    }

    async fn filter_by_author(&self, pos_id: PosId, author_id: UserId) -> Result<Vec<Review>> {
        let query = Self::select_reviews()
            .and_where(Expr::col(Reviews::PosId).eq(pos_id))
            .and_where(Expr::col(Reviews::AuthorId).eq(author_id))
            .to_string(SqliteQueryBuilder);
        self.fetch_all(&query).await
    }

    async fn filter_by_approval(
        &self,
        pos_id: PosId,
        min_count: u32,
        approved: bool,
    ) -> Result<Vec<Review>> {
        let at_quorum = if approved {
            Expr::col(Reviews::ApprovalCount).gte(min_count)
        } else {
            Expr::col(Reviews::ApprovalCount).lt(min_count)
        };
        let query = Self::select_reviews()
            .and_where(Expr::col(Reviews::PosId).eq(pos_id))
            .and_where(at_quorum)
            .to_string(SqliteQueryBuilder);
        self.fetch_all(&query).await
    }

    async fn upsert(&self, review: Review) -> Result<Review> {
        let (pos_id, author_id) = review_refs(&review)?;
        match review.id {
            None => self.insert(review, pos_id, author_id).await,
            Some(id) => self.update(id, review, pos_id, author_id).await,
        }
    }

    async fn delete(&self, id: ReviewId) -> Result<()> {
        let query = Query::delete()
            .from_table(Reviews::Table)
            .and_where(Expr::col(Reviews::Id).eq(id))
            .to_string(SqliteQueryBuilder);

        let result = sqlx::query(&query).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StorageError::not_found("Review", id));
        }
        Ok(())
    }
}
