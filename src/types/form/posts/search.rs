use serde::Deserialize;
use validator::{Validate, ValidateError};

use crate::util::validation::is_valid_search_term;

#[derive(Debug, Deserialize)]
pub struct Request {
  pub q: String,
}

impl Validate for Request {
  fn validate(&self) -> Result<(), ValidateError> {
    let mut fields = ValidateError::field_builder();
    fields.insert("q", {
      let mut error = ValidateError::msg_builder();
      if !is_valid_search_term(&self.q) {
        error.insert("Search terms need at least 2 characters");
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
  fn rejects_single_character_terms() {
    assert!(Request { q: "H".into() }.validate().is_err());
    assert!(Request { q: " H ".into() }.validate().is_err());
    assert!(Request { q: "Hi".into() }.validate().is_ok());
  }
}
