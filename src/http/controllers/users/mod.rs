mod account;
mod commented_posts;
mod login;
mod profile;
mod register;

pub use account::delete_account;
pub use commented_posts::commented_posts;
pub use login::login;
pub use profile::update_profile;
pub use register::register;
