use serde::Serialize;

use crate::{
  schema::User,
  types::id::{marker::UserMarker, Id},
};

pub mod account;
pub mod login;
pub mod profile;
pub mod register;

/// Public slice of a user row. Password hashes and timestamps
/// stay server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
  pub id: Id<UserMarker>,
  pub name: String,
  pub email: String,
}

impl From<User> for UserSummary {
  fn from(user: User) -> Self {
    Self {
      id: user.id,
      name: user.name,
      email: user.email,
    }
  }
}
