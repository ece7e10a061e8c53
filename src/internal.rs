/// Restricts implementations of public traits (id markers
/// for example) to types defined inside this crate.
pub trait Sealed {}
