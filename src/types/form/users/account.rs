use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Request {
  pub password: Sensitive<String>,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn requires_a_password() {
    let form = Request {
      password: Sensitive::new(String::new()),
    };
    assert!(form.validate().is_err());
  }
}
