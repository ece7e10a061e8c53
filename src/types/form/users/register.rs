use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateError};

use super::UserSummary;
use crate::util::{
  validation::{is_valid_email, is_valid_name, is_valid_password},
  Sensitive,
};

#[derive(Debug, Deserialize)]
pub struct Request {
  pub name: String,
  pub email: String,
  pub password: Sensitive<String>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("name", {
      let mut error = ValidateError::msg_builder();
      if !is_valid_name(&self.name) {
        error.insert("Invalid display name");
      }
      error.build()
    });

    fields.insert("email", {
      let mut error = ValidateError::msg_builder();
      if !is_valid_email(self.email.trim()) {
        error.insert("Invalid e-mail address");
      }
      error.build()
    });

    fields.insert("password", {
      let mut error = ValidateError::msg_builder();
      if !is_valid_password(self.password.as_str()) {
        error.insert("Passwords must be between 6 and 128 characters");
      }
      error.build()
    });

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

  fn form(name: &str, email: &str, password: &str) -> Request {
    Request {
      name: name.into(),
      email: email.into(),
      password: Sensitive::new(password.into()),
    }
  }

  #[test]
  fn accepts_a_complete_form() {
    assert!(form("Ana", "a@x.com", "secret1").validate().is_ok());
  }

  #[test]
  fn rejects_short_passwords() {
    let error = form("Ana", "a@x.com", "12345").validate().unwrap_err();
    assert_eq!(format!("{error:?}"), r#"{"password": {"_errors": ["Passwords must be between 6 and 128 characters"]}}"#);
  }

  #[test]
  fn rejects_blank_names_and_bad_emails() {
    assert!(form("   ", "a@x.com", "secret1").validate().is_err());
    assert!(form("Ana", "not-an-email", "secret1").validate().is_err());
  }
}
