mod create;
mod delete;
mod update;

pub use create::create;
pub use delete::delete;
pub use update::update;

use thiserror::Error as ThisError;

use crate::{http::Error, types::Error as ErrorType};

#[derive(Debug, ThisError)]
#[error("Comment is missing or owned by someone else")]
struct NotOwned;

fn not_owned() -> Error {
  Error::from_context(ErrorType::NotFound, NotOwned)
}
