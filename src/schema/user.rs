use chrono::NaiveDateTime;
use sqlx::FromRow;

use crate::{
  database::{Connection, ErrorExt, Result},
  types::id::{marker::UserMarker, Id},
};

#[derive(Debug, FromRow, PartialEq, Eq)]
pub struct User {
  pub id: Id<UserMarker>,
  pub created_at: NaiveDateTime,
  pub name: String,
  pub email: String,
  pub password_hash: String,
  pub updated_at: Option<NaiveDateTime>,
}

/// Partial field set for profile updates. Only fields that
/// actually changed are written to the row.
#[derive(Debug, Default)]
pub struct UserChanges {
  pub name: Option<String>,
  pub email: Option<String>,
  pub password_hash: Option<String>,
}

impl UserChanges {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.email.is_none() && self.password_hash.is_none()
  }
}

impl User {
  #[tracing::instrument(skip(conn))]
  pub async fn by_id(conn: &mut Connection, id: Id<UserMarker>) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE id = $1"#)
      .bind(id)
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  /// Emails are stored lower-cased; the lookup lower-cases its
  /// argument so every comparison happens on the normalized form.
  #[tracing::instrument(skip(conn, email), fields(email = "<hidden>"))]
  pub async fn by_email(conn: &mut Connection, email: &str) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>(r#"SELECT * FROM "users" WHERE email = $1"#)
      .bind(email.to_lowercase())
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  #[tracing::instrument(skip_all)]
  pub async fn insert(
    conn: &mut Connection,
    name: &str,
    email: &str,
    password_hash: &str,
  ) -> Result<Self> {
    sqlx::query_as::<_, Self>(
      r#"INSERT INTO "users" (name, email, password_hash)
      VALUES ($1, $2, $3)
      RETURNING *"#,
    )
    .bind(name.trim())
    .bind(email.to_lowercase())
    .bind(password_hash)
    .fetch_one(conn)
    .await
    .into_db_error()
  }

  /// Applies a partial update, bumping `updated_at`. Returns `None`
  /// when the user row no longer exists.
  #[tracing::instrument(skip(conn, changes))]
  pub async fn update(
    conn: &mut Connection,
    id: Id<UserMarker>,
    changes: &UserChanges,
  ) -> Result<Option<Self>> {
    debug_assert!(!changes.is_empty());

    let mut query = sqlx::QueryBuilder::<sqlx::Postgres>::new(r#"UPDATE "users" SET "#);
    {
      let mut fields = query.separated(", ");
      if let Some(name) = changes.name.as_deref() {
        fields.push("name = ").push_bind_unseparated(name);
      }
      if let Some(email) = changes.email.as_deref() {
        fields.push("email = ").push_bind_unseparated(email.to_lowercase());
      }
      if let Some(password_hash) = changes.password_hash.as_deref() {
        fields.push("password_hash = ").push_bind_unseparated(password_hash);
      }
      fields.push("updated_at = NOW()");
    }

    query.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
    query
      .build_query_as::<Self>()
      .fetch_optional(conn)
      .await
      .into_db_error()
  }

  /// Removes the user together with everything they own. Comments
  /// left by other users on the removed user's posts go away too,
  /// no orphan rows survive. Must run inside a transaction.
  #[tracing::instrument(skip(conn))]
  pub async fn delete_with_content(
    conn: &mut Connection,
    id: Id<UserMarker>,
  ) -> Result<Option<Id<UserMarker>>> {
    sqlx::query(r#"DELETE FROM "comments" WHERE user_id = $1"#)
      .bind(id)
      .execute(&mut *conn)
      .await
      .into_db_error()?;

    sqlx::query(
      r#"DELETE FROM "comments"
      WHERE post_id IN (SELECT id FROM "posts" WHERE user_id = $1)"#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await
    .into_db_error()?;

    sqlx::query(r#"DELETE FROM "posts" WHERE user_id = $1"#)
      .bind(id)
      .execute(&mut *conn)
      .await
      .into_db_error()?;

    let deleted = sqlx::query_scalar::<_, Id<UserMarker>>(
      r#"DELETE FROM "users" WHERE id = $1 RETURNING id"#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .into_db_error()?;

    Ok(deleted)
  }
}
