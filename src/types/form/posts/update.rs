use serde::Deserialize;
use validator::{Validate, ValidateError};

#[derive(Debug, Deserialize)]
pub struct Request {
  pub content: String,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("content", {
      let mut error = ValidateError::msg_builder();
      if self.content.trim().is_empty() {
        error.insert("Content is required");
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
  fn rejects_blank_content() {
    let form = Request { content: "  ".into() };
    assert!(form.validate().is_err());
  }
}
