use crate::{Validate, ValidateError};

impl<T: Validate> Validate for Box<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    T::validate(self)
  }
}

impl<T: Validate> Validate for Option<T> {
  fn validate(&self) -> Result<(), ValidateError> {
    match self {
      Some(n) => n.validate(),
      None => Ok(()),
    }
  }
}

impl<'a, T: Validate> Validate for &'a T {
  fn validate(&self) -> Result<(), ValidateError> {
    T::validate(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct NonBlank(&'static str);

  impl Validate for NonBlank {
    fn validate(&self) -> Result<(), ValidateError> {
      let mut error = ValidateError::msg_builder();
      if self.0.trim().is_empty() {
        error.insert("must not be blank");
      }
      error.build().into_result()
    }
  }

  #[test]
  fn option_validates_only_when_present() {
    assert!(None::<NonBlank>.validate().is_ok());
    assert!(Some(NonBlank("hi")).validate().is_ok());
    assert!(Some(NonBlank(" ")).validate().is_err());
  }

  #[test]
  fn wrappers_delegate_to_the_inner_value() {
    assert!(Box::new(NonBlank("hi")).validate().is_ok());
    assert!((&NonBlank(" ")).validate().is_err());
  }
}
