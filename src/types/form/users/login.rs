use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use super::UserSummary;
use crate::util::Sensitive;

/// Presence only. Format checks would leak whether an address
/// could exist, unknown accounts and wrong passwords must be
/// indistinguishable from here on.
#[derive(Debug, Deserialize)]
pub struct Request {
  pub email: String,
  pub password: Sensitive<String>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("email", {
      let mut error = ValidateError::msg_builder();
      if self.email.trim().is_empty() {
        error.insert("E-mail is required");
      }
      error.build()
    });

    fields.insert("password", {
      let mut error = ValidateError::msg_builder();
      if self.password.as_str().is_empty() {
        error.insert("Password is required");
      }
      error.build()
    });

    fields.build().into_result()
  }
}

#[derive(Debug, Serialize)]
pub struct Response {
  pub token: String,
  pub user: UserSummary,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn requires_both_fields() {
    let form = Request {
      email: "  ".into(),
      password: Sensitive::new(String::new()),
    };
    let error = form.validate().unwrap_err();
    assert_eq!(
      format!("{error:?}"),
      r#"{"email": {"_errors": ["E-mail is required"]}, "password": {"_errors": ["Password is required"]}}"#
    );
  }

  #[test]
  fn passes_with_any_non_empty_credentials() {
    let form = Request {
      email: "whoever".into(),
      password: Sensitive::new("x".into()),
    };
    assert!(form.validate().is_ok());
  }
}
