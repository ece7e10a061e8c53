use error_stack::Report;
use thiserror::Error;

/// Database related errors
#[derive(Debug, Error)]
pub enum Error {
  /// An error caused by an invalid Postgres connection
  /// url for either the primary or the replica pool.
  #[error("invalid connection url")]
  InvalidUrl,
  /// An error caused by an [`sqlx`] error.
  #[error("received a pool error: {0}")]
  Internal(sqlx::Error),
  /// The database pool (primary) is currently in read mode
  /// (most likely due to maintenance) and should not perform
  /// any writes.
  #[error("database is currently in read mode")]
  Readonly,
  /// Either the primary or replica database pools do not
  /// have reliable connection to transact to the database.
  #[error("unhealthy database pool")]
  UnhealthyPool,
  /// A write collided with a unique constraint (duplicate
  /// e-mail and the like). Pre-insert existence checks cannot
  /// close this window, two requests may pass them at once.
  #[error("unique constraint violated")]
  UniqueViolation,
}

/// Lazily typed [`std::result::Result`] but the error generic
/// is filled up with [a database error](Error).
pub type Result<T> = error_stack::Result<T, Error>;

/// Converts from a generic [sqlx] result into a [database compatible error](Error).
pub trait ErrorExt<T> {
  fn into_db_error(self) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, sqlx::Error> {
  fn into_db_error(self) -> Result<T> {
    self.map_err(|e| match &e {
      sqlx::Error::Database(err) if err.message().ends_with("read-only transaction") => {
        Report::new(e).change_context(Error::Readonly)
      }
      sqlx::Error::Database(err)
        if matches!(err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
      {
        Report::new(e).change_context(Error::UniqueViolation)
      }
      _ => Report::new(Error::Internal(e)),
    })
  }
}

/// This trait deals with `error_stack::Report<Error>` because it is
/// annoying to implement code if [`Error`] is variant of something.
pub trait ErrorExt2 {
  fn is_unhealthy(&self) -> bool;
}

impl ErrorExt2 for error_stack::Report<Error> {
  fn is_unhealthy(&self) -> bool {
    self
      .downcast_ref::<Error>()
      .map(|v| matches!(v, Error::UnhealthyPool))
      .unwrap_or_default()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use sqlx::error::ErrorKind;
  use std::borrow::Cow;

  #[derive(Debug)]
  struct StubDbError {
    message: &'static str,
    unique: bool,
  }

  impl std::fmt::Display for StubDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.write_str(self.message)
    }
  }

  impl std::error::Error for StubDbError {}

  impl sqlx::error::DatabaseError for StubDbError {
    fn message(&self) -> &str {
      self.message
    }

    fn code(&self) -> Option<Cow<'_, str>> {
      self.unique.then(|| Cow::Borrowed("23505"))
    }

    fn kind(&self) -> ErrorKind {
      if self.unique {
        ErrorKind::UniqueViolation
      } else {
        ErrorKind::Other
      }
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
      self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
      self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
      self
    }
  }

  fn db_failure(message: &'static str, unique: bool) -> std::result::Result<(), sqlx::Error> {
    Err(sqlx::Error::Database(Box::new(StubDbError {
      message,
      unique,
    })))
  }

  #[test]
  fn unique_violations_get_their_own_context() {
    let report = db_failure("duplicate key value", true)
      .into_db_error()
      .unwrap_err();
    assert!(matches!(report.current_context(), Error::UniqueViolation));
  }

  #[test]
  fn readonly_transactions_are_detected_from_the_message() {
    let report = db_failure("cannot execute INSERT in a read-only transaction", false)
      .into_db_error()
      .unwrap_err();
    assert!(matches!(report.current_context(), Error::Readonly));
  }

  #[test]
  fn anything_else_is_internal() {
    let report = db_failure("syntax error", false).into_db_error().unwrap_err();
    assert!(matches!(report.current_context(), Error::Internal(..)));
  }
}
