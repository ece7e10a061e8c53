#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod std_impl;

pub use error::*;
pub mod extras;

/// Checks whether a form (or any other user provided data)
/// contains acceptable values before it is acted upon.
pub trait Validate {
  fn validate(&self) -> Result<(), ValidateError>;
}
