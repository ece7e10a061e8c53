use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Client facing error taxonomy.
///
/// Whatever caused the failure internally, the client only ever
/// sees one of these variants. `NotFound` deliberately covers both
/// "the resource does not exist" and "the requester does not own
/// the resource" so that failed ownership probes leak nothing.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Error {
  Conflict,
  Forbidden,
  Internal,
  InvalidFormBody(validator::ValidateError),
  NotFound,
  ReadonlyMode,
  Unauthorized,
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Error::Conflict => f.write_str("Requested change collides with an existing record"),
      Error::Forbidden => f.write_str("User performed request with invalid credentials"),
      Error::Internal => f.write_str("Failed to perform request"),
      Error::InvalidFormBody(..) => f.write_str("User performed request with invalid body"),
      Error::NotFound => f.write_str("Requested resource is absent or not owned"),
      Error::ReadonlyMode => f.write_str("Attempt to write read-only database"),
      Error::Unauthorized => f.write_str("User performed request without authentication"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_test::Token;

  #[track_caller]
  fn assert_unit_variant(value: Error, variant: &'static str) {
    serde_test::assert_tokens(
      &value,
      &[
        Token::Struct { name: "Error", len: 1 },
        Token::Str("type"),
        Token::Str(variant),
        Token::StructEnd,
      ],
    );
  }

  #[test]
  fn test_serde_impl() {
    assert_unit_variant(Error::Conflict, "conflict");
    assert_unit_variant(Error::Forbidden, "forbidden");
    assert_unit_variant(Error::Internal, "internal");
    assert_unit_variant(Error::NotFound, "not_found");
    assert_unit_variant(Error::ReadonlyMode, "readonly_mode");
    assert_unit_variant(Error::Unauthorized, "unauthorized");
  }
}
