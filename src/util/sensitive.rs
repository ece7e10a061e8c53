use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::ops::Deref;

/// Keeps the raw sensitive data (passwords, connection urls,
/// signing keys) in memory but it cannot be accidentally leaked
/// through the console or logs.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
  #[must_use]
  pub const fn new(value: T) -> Self {
    Self(value)
  }

  #[must_use]
  pub fn into_inner(self) -> T {
    self.0
  }
}

impl<T> Debug for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("<hidden>").finish()
  }
}

impl<T> Display for Sensitive<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("<hidden>").finish()
  }
}

impl<T> AsRef<T> for Sensitive<T> {
  fn as_ref(&self) -> &T {
    &self.0
  }
}

impl<T: Deref> Sensitive<T> {
  #[must_use]
  pub fn as_deref(&self) -> Sensitive<&T::Target> {
    Sensitive(self.0.deref())
  }
}

impl<T: AsRef<str>> Sensitive<T> {
  #[must_use]
  pub fn as_str(&self) -> &str {
    self.0.as_ref()
  }
}

impl<T> From<T> for Sensitive<T> {
  fn from(value: T) -> Self {
    Self(value)
  }
}

impl AsRef<[u8]> for Sensitive<String> {
  fn as_ref(&self) -> &[u8] {
    self.0.as_ref()
  }
}

#[cfg(test)]
mod tests {
  use super::Sensitive;

  #[test]
  fn test_fmt_redaction() {
    let secret = Sensitive::new("hunter2".to_string());
    assert_eq!("<hidden>", format!("{secret:?}"));
    assert_eq!("<hidden>", format!("{secret}"));
  }

  #[test]
  fn test_serde_transparency() {
    let secret: Sensitive<String> = serde_json::from_str(r#""hunter2""#).unwrap();
    assert_eq!("hunter2", secret.as_str());
    assert_eq!(r#""hunter2""#, serde_json::to_string(&secret).unwrap());
  }
}
