use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use super::UserSummary;
use crate::util::{
  validation::{is_valid_email, is_valid_name, is_valid_password},
  Sensitive,
};

/// Every field is optional, only what is present gets checked.
/// Whether `current_password` is required depends on the stored
/// row, so the handler enforces that part.
#[derive(Debug, Deserialize)]
pub struct Request {
  pub name: Option<String>,
  pub email: Option<String>,
  pub current_password: Option<Sensitive<String>>,
  pub new_password: Option<Sensitive<String>>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    if let Some(name) = self.name.as_deref() {
      fields.insert("name", {
        let mut error = ValidateError::msg_builder();
        if !is_valid_name(name) {
          error.insert("Invalid display name");
        }
        error.build()
      });
    }

    if let Some(email) = self.email.as_deref() {
      fields.insert("email", {
        let mut error = ValidateError::msg_builder();
        if !is_valid_email(email.trim()) {
          error.insert("Invalid e-mail address");
        }
        error.build()
      });
    }

    if let Some(password) = self.new_password.as_ref() {
      fields.insert("new_password", {
        let mut error = ValidateError::msg_builder();
        if !is_valid_password(password.as_str()) {
          error.insert("Passwords must be between 6 and 128 characters");
        }
        error.build()
      });
    }

    fields.build().into_result()
  }
}

#[derive(Debug, Serialize)]
pub struct Response {
  pub message: &'static str,
  pub user: UserSummary,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_request_is_valid() {
    let form = Request {
      name: None,
      email: None,
      current_password: None,
      new_password: None,
    };
    assert!(form.validate().is_ok());
  }

  #[test]
  fn present_fields_are_checked() {
    let form = Request {
      name: Some("  ".into()),
      email: Some("nope".into()),
      current_password: None,
      new_password: Some(Sensitive::new("12345".into())),
    };
    let error = form.validate().unwrap_err();
    let rendered = format!("{error:?}");
    assert!(rendered.contains("name"));
    assert!(rendered.contains("email"));
    assert!(rendered.contains("new_password"));
  }
}
