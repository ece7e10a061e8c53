mod comment;
mod post;
mod user;
mod view;

pub use comment::Comment;
pub use post::Post;
pub use user::{User, UserChanges};
pub use view::{CommentView, PostView};
