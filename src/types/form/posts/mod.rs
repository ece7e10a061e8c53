pub mod create;
pub mod search;
pub mod update;
