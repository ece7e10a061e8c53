use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{
    marker::{CommentMarker, PostMarker, UserMarker},
    Id,
  },
};

#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct Comment {
  pub id: Id<CommentMarker>,
  pub post_id: Id<PostMarker>,
  pub user_id: Id<UserMarker>,
  pub content: String,
  pub created_at: NaiveDateTime,
  pub updated_at: Option<NaiveDateTime>,
}

impl Comment {
  #[tracing::instrument(skip(conn, content))]
  pub async fn insert(
    conn: &mut Connection,
    post_id: Id<PostMarker>,
    user_id: Id<UserMarker>,
    content: &str,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "comments" (post_id, user_id, content)
      VALUES ($1, $2, $3)
      RETURNING *"#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content.trim())
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  #[tracing::instrument(skip(conn, content))]
  pub async fn update_content(
    conn: &mut Connection,
    id: Id<CommentMarker>,
    owner: Id<UserMarker>,
    content: &str,
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(
      r#"UPDATE "comments"
      SET content = $1, updated_at = NOW()
      WHERE id = $2 AND user_id = $3
      RETURNING *"#,
    )
    .bind(content.trim())
    .bind(id)
    .bind(owner)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }

  /// Returns the removed comment's id and its parent post id so
  /// subscribers can drop it from the right thread.
  #[tracing::instrument(skip(conn))]
  pub async fn delete(
    conn: &mut Connection,
    id: Id<CommentMarker>,
    owner: Id<UserMarker>,
  ) -> Result<Option<(Id<CommentMarker>, Id<PostMarker>)>> {
    sqlx::query_as::<_, (Id<CommentMarker>, Id<PostMarker>)>(
      r#"DELETE FROM "comments"
      WHERE id = $1 AND user_id = $2
      RETURNING id, post_id"#,
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(conn)
    .await
    .into_db_error()
  }
}
