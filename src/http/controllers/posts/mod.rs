mod create;
mod delete;
mod list;
mod search;
mod update;

pub use create::create;
pub use delete::delete;
pub use list::{list, mine};
pub use search::search;
pub use update::update;

use thiserror::Error as ThisError;

use crate::{http::Error, types::Error as ErrorType};

/// Missing posts and posts owned by someone else answer the same
/// way, probing for other people's post ids reveals nothing.
#[derive(Debug, ThisError)]
#[error("Post is missing or owned by someone else")]
struct NotOwned;

fn not_owned() -> Error {
  Error::from_context(ErrorType::NotFound, NotOwned)
}
