//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query building.

use sea_query::Iden;

/// Points-of-sale table schema.
#[derive(Iden)]
pub enum PointsOfSale {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "name"]
    Name,
}

/// Users table schema.
#[derive(Iden)]
pub enum Users {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "login_name"]
    LoginName,
}

/// Reviews table schema.
#[derive(Iden)]
pub enum Reviews {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "created_at"]
    CreatedAt,
    #[iden = "updated_at"]
    UpdatedAt,
    #[iden = "pos_id"]
    PosId,
    #[iden = "author_id"]
    AuthorId,
    #[iden = "review"]
    Review,
    #[iden = "approval_count"]
    ApprovalCount,
    #[iden = "approved"]
    Approved,
}

/// SQL for creating the points-of-sale table.
pub const CREATE_POS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS points_of_sale (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
)
"#;

/// SQL for creating the users table.
pub const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    login_name TEXT NOT NULL
)
"#;

/// SQL for creating the reviews table.
///
/// The unique constraint backs the one-review-per-author-per-POS rule
/// when two submissions race.
pub const CREATE_REVIEWS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    pos_id INTEGER NOT NULL REFERENCES points_of_sale(id),
    author_id INTEGER NOT NULL REFERENCES users(id),
    review TEXT NOT NULL,
    approval_count INTEGER NOT NULL DEFAULT 0,
    approved INTEGER NOT NULL DEFAULT 0,
    UNIQUE (pos_id, author_id)
)
"#;

/// SQL for the approval listing index.
pub const CREATE_REVIEWS_POS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reviews_pos_count ON reviews(pos_id, approval_count)";
