use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use std::collections::HashMap;

use super::post::BOARD_CATEGORY;
use crate::{
  database::{Connection, ErrorExt, Result},
  schema::{Comment, Post},
  types::id::{
    marker::{CommentMarker, PostMarker, UserMarker},
    Id,
  },
};

/// Shown in place of an author name when the user row is gone.
/// Content cascades with its owner, so readers should only ever
/// see this on rows captured mid-deletion.
const DELETED_AUTHOR: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
  pub id: Id<CommentMarker>,
  pub post_id: Id<PostMarker>,
  pub user_id: Id<UserMarker>,
  pub author_name: String,
  pub content: String,
  pub created_at: NaiveDateTime,
  pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
  pub id: Id<PostMarker>,
  pub user_id: Id<UserMarker>,
  pub author_name: String,
  pub title: String,
  pub content: String,
  pub created_at: NaiveDateTime,
  pub updated_at: Option<NaiveDateTime>,
  pub comments: Vec<CommentView>,
}

#[derive(FromRow)]
struct PostRow {
  id: Id<PostMarker>,
  user_id: Id<UserMarker>,
  author_name: Option<String>,
  title: String,
  content: String,
  created_at: NaiveDateTime,
  updated_at: Option<NaiveDateTime>,
}

#[derive(FromRow)]
struct CommentRow {
  id: Id<CommentMarker>,
  post_id: Id<PostMarker>,
  user_id: Id<UserMarker>,
  author_name: Option<String>,
  content: String,
  created_at: NaiveDateTime,
  updated_at: Option<NaiveDateTime>,
}

impl From<CommentRow> for CommentView {
  fn from(row: CommentRow) -> Self {
    Self {
      id: row.id,
      post_id: row.post_id,
      user_id: row.user_id,
      author_name: row.author_name.unwrap_or_else(|| DELETED_AUTHOR.into()),
      content: row.content,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

const POST_SELECT: &str = r#"SELECT p.id, p.user_id, u.name AS author_name,
  p.title, p.content, p.created_at, p.updated_at
  FROM "posts" p
  LEFT JOIN "users" u ON u.id = p.user_id
  WHERE p.type_id = $1"#;

impl CommentView {
  pub fn from_comment(comment: Comment, author_name: String) -> Self {
    Self {
      id: comment.id,
      post_id: comment.post_id,
      user_id: comment.user_id,
      author_name,
      content: comment.content,
      created_at: comment.created_at,
      updated_at: comment.updated_at,
    }
  }
}

impl PostView {
  /// Combines a post with its author name and comments. Comments
  /// are ordered oldest first, ties broken by id so the order is
  /// stable across assemblies.
  pub fn assemble(post: Post, author_name: Option<String>, mut comments: Vec<CommentView>) -> Self {
    comments.sort_by_key(|c| (c.created_at, c.id.get()));
    Self {
      id: post.id,
      user_id: post.user_id,
      author_name: author_name.unwrap_or_else(|| DELETED_AUTHOR.into()),
      title: post.title,
      content: post.content,
      created_at: post.created_at,
      updated_at: post.updated_at,
      comments,
    }
  }

  #[tracing::instrument(skip(conn))]
  pub async fn all(conn: &mut Connection) -> Result<Vec<Self>> {
    let rows = sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} ORDER BY p.created_at DESC"))
      .bind(BOARD_CATEGORY)
      .fetch_all(&mut *conn)
      .await
      .into_db_error()?;

    Self::hydrate(conn, rows).await
  }

  #[tracing::instrument(skip(conn))]
  pub async fn by_user(conn: &mut Connection, user_id: Id<UserMarker>) -> Result<Vec<Self>> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
      "{POST_SELECT} AND p.user_id = $2 ORDER BY p.created_at DESC"
    ))
    .bind(BOARD_CATEGORY)
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Self::hydrate(conn, rows).await
  }

  /// Case-insensitive substring match over titles and bodies.
  #[tracing::instrument(skip(conn, term))]
  pub async fn search(conn: &mut Connection, term: &str) -> Result<Vec<Self>> {
    let pattern = format!("%{}%", term.trim());
    let rows = sqlx::query_as::<_, PostRow>(&format!(
      "{POST_SELECT} AND (p.title ILIKE $2 OR p.content ILIKE $2) ORDER BY p.created_at DESC"
    ))
    .bind(BOARD_CATEGORY)
    .bind(pattern)
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Self::hydrate(conn, rows).await
  }

  /// Posts where the given user left at least one comment,
  /// regardless of who authored the post itself.
  #[tracing::instrument(skip(conn))]
  pub async fn commented_by(conn: &mut Connection, user_id: Id<UserMarker>) -> Result<Vec<Self>> {
    let rows = sqlx::query_as::<_, PostRow>(&format!(
      r#"{POST_SELECT} AND p.id IN (SELECT DISTINCT post_id FROM "comments" WHERE user_id = $2)
      ORDER BY p.created_at DESC"#
    ))
    .bind(BOARD_CATEGORY)
    .bind(user_id)
    .fetch_all(&mut *conn)
    .await
    .into_db_error()?;

    Self::hydrate(conn, rows).await
  }

  #[tracing::instrument(skip(conn))]
  pub async fn by_id(conn: &mut Connection, id: Id<PostMarker>) -> Result<Option<Self>> {
    let row = sqlx::query_as::<_, PostRow>(&format!("{POST_SELECT} AND p.id = $2"))
      .bind(BOARD_CATEGORY)
      .bind(id)
      .fetch_optional(&mut *conn)
      .await
      .into_db_error()?;

    let Some(row) = row else { return Ok(None) };
    Ok(Self::hydrate(conn, vec![row]).await?.pop())
  }

  /// Attaches comments to each post row with one query for the
  /// whole batch. Post order is preserved as loaded.
  async fn hydrate(conn: &mut Connection, rows: Vec<PostRow>) -> Result<Vec<Self>> {
    if rows.is_empty() {
      return Ok(Vec::new());
    }

    let post_ids = rows.iter().map(|row| row.id.as_db()).collect::<Vec<_>>();
    let comment_rows = sqlx::query_as::<_, CommentRow>(
      r#"SELECT c.id, c.post_id, c.user_id, u.name AS author_name,
      c.content, c.created_at, c.updated_at
      FROM "comments" c
      LEFT JOIN "users" u ON u.id = c.user_id
      WHERE c.post_id = ANY($1)
      ORDER BY c.created_at ASC, c.id ASC"#,
    )
    .bind(post_ids)
    .fetch_all(conn)
    .await
    .into_db_error()?;

    let mut by_post: HashMap<Id<PostMarker>, Vec<CommentView>> = HashMap::new();
    for row in comment_rows {
      by_post.entry(row.post_id).or_default().push(row.into());
    }

    Ok(
      rows
        .into_iter()
        .map(|row| Self {
          id: row.id,
          user_id: row.user_id,
          author_name: row.author_name.unwrap_or_else(|| DELETED_AUTHOR.into()),
          title: row.title,
          content: row.content,
          created_at: row.created_at,
          updated_at: row.updated_at,
          comments: by_post.remove(&row.id).unwrap_or_default(),
        })
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;

  fn at(secs: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 1)
      .unwrap()
      .and_hms_opt(12, 0, secs)
      .unwrap()
  }

  fn post() -> Post {
    Post {
      id: Id::new(10),
      user_id: Id::new(1),
      title: "hello".into(),
      content: "world".into(),
      created_at: at(0),
      updated_at: None,
    }
  }

  fn comment(id: u64, secs: u32) -> CommentView {
    CommentView {
      id: Id::new(id),
      post_id: Id::new(10),
      user_id: Id::new(2),
      author_name: "ana".into(),
      content: "hi".into(),
      created_at: at(secs),
      updated_at: None,
    }
  }

  #[test]
  fn assemble_orders_comments_oldest_first() {
    let view = PostView::assemble(
      post(),
      Some("bob".into()),
      vec![comment(3, 30), comment(1, 10), comment(2, 20)],
    );
    let ids = view.comments.iter().map(|c| c.id.get()).collect::<Vec<_>>();
    assert_eq!(ids, vec![1, 2, 3]);
  }

  #[test]
  fn assemble_breaks_timestamp_ties_by_id() {
    let view = PostView::assemble(
      post(),
      Some("bob".into()),
      vec![comment(5, 10), comment(4, 10)],
    );
    let ids = view.comments.iter().map(|c| c.id.get()).collect::<Vec<_>>();
    assert_eq!(ids, vec![4, 5]);
  }

  #[test]
  fn assemble_falls_back_on_missing_author() {
    let view = PostView::assemble(post(), None, Vec::new());
    assert_eq!(view.author_name, "unknown");
    assert!(view.comments.is_empty());
  }
}
