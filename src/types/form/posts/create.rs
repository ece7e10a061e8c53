use serde::Deserialize;
use validator::{Validate, ValidateError};

#[derive(Debug, Deserialize)]
pub struct Request {
  pub title: String,
  pub content: String,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("title", {
      let mut error = ValidateError::msg_builder();
      if self.title.trim().is_empty() {
        error.insert("Title is required");
      }
      error.build()
    });

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
  fn requires_title_and_content() {
    let form = Request {
      title: " ".into(),
      content: String::new(),
    };
    let error = form.validate().unwrap_err();
    assert_eq!(
      format!("{error:?}"),
      r#"{"title": {"_errors": ["Title is required"]}, "content": {"_errors": ["Content is required"]}}"#
    );
  }

  #[test]
  fn accepts_a_filled_form() {
    let form = Request {
      title: "Hi".into(),
      content: "Hello".into(),
    };
    assert!(form.validate().is_ok());
  }
}
