//! Request and response bodies for every route, with their
//! validation rules. Validation never touches the database, the
//! contextual checks (uniqueness, ownership) live in the handlers.

pub mod comments;
pub mod posts;
pub mod users;
