use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{PostMarker, UserMarker},
    Id,
  },
};

/// Category marker stamped on every board post. Other categories
/// were planned at some point and never materialized, reads still
/// filter on it so stray rows cannot surface.
pub const BOARD_CATEGORY: i32 = 1;

#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct Post {
  pub id: Id<PostMarker>,
  pub user_id: Id<UserMarker>,
  pub title: String,
  pub content: String,
  pub created_at: NaiveDateTime,
  pub updated_at: Option<NaiveDateTime>,
}

impl Post {
  #[tracing::instrument(skip(conn, title, content))]
  pub async fn insert(
    conn: &mut Connection,
    user_id: Id<UserMarker>,
    title: &str,
    content: &str,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "posts" (user_id, title, content, type_id)
      VALUES ($1, $2, $3, $4)
      RETURNING id, user_id, title, content, created_at, updated_at"#,
    )
    .bind(user_id)
    .bind(title.trim())
    .bind(content.trim())
    .bind(BOARD_CATEGORY)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn))]
  pub async fn exists(conn: &mut Connection, id: Id<PostMarker>) -> Result<bool> {
    sqlx::query_scalar::<_, Id<PostMarker>>(r#"SELECT id FROM "posts" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
      .map(|row| row.is_some())
  }

  /// Ownership check is folded into the statement itself, a zero
  /// row result is the only "not found or not owned" signal the
  /// caller ever needs. Titles are immutable after creation.
  #[tracing::instrument(skip(conn, content))]
  pub async fn update_content(
    conn: &mut Connection,
    id: Id<PostMarker>,
    owner: Id<UserMarker>,
    content: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "posts"
      SET content = $1, updated_at = NOW()
      WHERE id = $2 AND user_id = $3
      RETURNING id, user_id, title, content, created_at, updated_at"#,
    )
    .bind(content.trim())
    .bind(id)
    .bind(owner)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Deletes the post and its comments. The comment sweep reuses
  /// the same folded ownership filter, so a non-owner request
  /// touches nothing at all. Must run inside a transaction.
  #[tracing::instrument(skip(conn))]
  pub async fn delete(
    conn: &mut Connection,
    id: Id<PostMarker>,
    owner: Id<UserMarker>,
  ) -> Result<Option<Id<PostMarker>>> {
    sqlx::query(
      r#"DELETE FROM "comments"
      WHERE post_id IN (SELECT id FROM "posts" WHERE id = $1 AND user_id = $2)"#,
    )
    .bind(id)
    .bind(owner)
    .execute(&mut *conn)
    .await
    .into_db_error()?;

    sqlx::query_scalar::<_, Id<PostMarker>>(
      r#"DELETE FROM "posts" WHERE id = $1 AND user_id = $2 RETURNING id"#,
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(&mut *conn)
    .await
    .into_db_error()
  }
}
