use error_stack::{Context, Report};
use tracing_error::SpanTrace;

use crate::types;

mod impls;

/// Route-level error. Couples the client-facing [`types::Error`]
/// with the full report and captured span trace for the logs.
pub struct Error {
  error_type: types::Error,
  report: Report<Box<dyn Context>>,
  trace: SpanTrace,
}

impl Error {
  #[must_use]
  pub fn from_context(error_type: types::Error, context: impl Context) -> Self {
    Self {
      error_type,
      report: to_any_report(context),
      trace: SpanTrace::capture(),
    }
  }

  #[must_use]
  pub fn from_report(error_type: types::Error, report: Report<impl Context>) -> Self {
    Self {
      error_type,
      report: cast_to_any_report(report),
      trace: SpanTrace::capture(),
    }
  }

  #[must_use]
  pub fn as_type(&self) -> &types::Error {
    &self.error_type
  }
}

impl std::fmt::Debug for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Error")
      .field("type", &self.error_type)
      .field("report", &self.report)
      .field("trace", &self.trace)
      .finish()
  }
}

impl std::fmt::Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}: ", &self.error_type)?;
    writeln!(f, "{:?}", self.report)?;
    std::fmt::Display::fmt(&self.trace, f)
  }
}

fn cast_to_any_report(report: Report<impl Context>) -> Report<Box<dyn Context>> {
  unsafe { std::mem::transmute::<_, Report<Box<dyn Context>>>(report) }
}

fn to_any_report(context: impl Context) -> Report<Box<dyn Context>> {
  unsafe { std::mem::transmute::<_, Report<Box<dyn Context>>>(Report::new(context)) }
}

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::{http::StatusCode, ResponseError};
  use validator::ValidateError;

  #[derive(Debug, thiserror::Error)]
  #[error("test failure")]
  struct Failure;

  #[track_caller]
  fn assert_status(error_type: types::Error, status: StatusCode) {
    let error = Error::from_context(error_type, Failure);
    assert_eq!(error.status_code(), status);
  }

  #[test]
  fn status_codes_follow_the_taxonomy() {
    assert_status(types::Error::Conflict, StatusCode::CONFLICT);
    assert_status(types::Error::Forbidden, StatusCode::FORBIDDEN);
    assert_status(types::Error::Internal, StatusCode::INTERNAL_SERVER_ERROR);
    assert_status(types::Error::NotFound, StatusCode::NOT_FOUND);
    assert_status(types::Error::ReadonlyMode, StatusCode::SERVICE_UNAVAILABLE);
    assert_status(types::Error::Unauthorized, StatusCode::UNAUTHORIZED);
  }

  #[test]
  fn validation_failures_map_to_bad_request() {
    let error: Error = ValidateError::field("title", "Title is required").into();
    assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    assert!(matches!(
      error.as_type(),
      types::Error::InvalidFormBody(..)
    ));
  }

  #[test]
  fn database_reports_split_readonly_from_internal() {
    use crate::database;

    let readonly: Error = Report::new(database::Error::Readonly).into();
    assert_eq!(readonly.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let other: Error = Report::new(database::Error::UnhealthyPool).into();
    assert_eq!(other.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn unique_violations_surface_as_conflicts() {
    use crate::database;

    let conflict: Error = Report::new(database::Error::UniqueViolation).into();
    assert_eq!(conflict.status_code(), StatusCode::CONFLICT);
  }
}
