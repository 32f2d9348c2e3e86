//! Application store: records, validation rules and the in-memory collection.

pub mod memory;
pub mod password;
pub mod types;

pub use memory::{ApplicationStore, PasswordFn};
pub use password::random_password;
pub use types::{Application, ApplicationPatch, Deleted, NewApplication};
