/// User account entity
///
/// Type definitions and SQLite persistence for platform accounts,
/// including the explicit owner cascade onto projects.

pub mod store;
pub mod types;

pub use store::UserStore;
pub use types::{NewUser, Role, Stats, User, UserPatch};
