use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
    .expect("compile email regex")
});

pub const NAME_MAX: usize = 100;

pub const PASSWORD_MIN: usize = 6;
pub const PASSWORD_MAX: usize = 128;

pub const SEARCH_TERM_MIN: usize = 2;

pub fn is_valid_email(email: &str) -> bool {
  EMAIL_REGEX.is_match(email) && email.len() <= 254
}

pub fn is_valid_password(pass: &str) -> bool {
  let len = pass.len();
  (PASSWORD_MIN..=PASSWORD_MAX).contains(&len)
}

/// Display names only need to be non-blank and reasonably sized,
/// there is no separate handle/username concept.
pub fn is_valid_name(name: &str) -> bool {
  let trimmed = name.trim();
  !trimmed.is_empty() && trimmed.len() <= NAME_MAX
}

pub fn is_valid_search_term(term: &str) -> bool {
  term.trim().len() >= SEARCH_TERM_MIN
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_valid_email() {
    assert!(is_valid_email("gush@gmail.com"));
    assert!(is_valid_email("a@x.com"));
    assert!(!is_valid_email("nada_neutho"));
    assert!(!is_valid_email("missing@tld@twice.com"));
  }

  #[test]
  fn test_is_valid_password() {
    assert!(is_valid_password("secret1"));
    // exactly at the minimum
    assert!(is_valid_password("123456"));
    assert!(!is_valid_password("12345"));
    assert!(!is_valid_password(&"x".repeat(PASSWORD_MAX + 1)));
  }

  #[test]
  fn test_is_valid_name() {
    assert!(is_valid_name("Ana"));
    assert!(!is_valid_name("   "));
    assert!(!is_valid_name(&"x".repeat(NAME_MAX + 1)));
  }

  #[test]
  fn test_is_valid_search_term() {
    assert!(is_valid_search_term("Hi"));
    assert!(!is_valid_search_term("H"));
    assert!(!is_valid_search_term(" H "));
  }
}
