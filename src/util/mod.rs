pub mod figment;
pub mod password;
pub mod sensitive;
pub mod validation;
pub mod validator;

pub use sensitive::Sensitive;
