/// Portfolio project entity
///
/// Type definitions and SQLite persistence for the projects users publish.
/// Every project is owned by exactly one user (1:N).

pub mod store;
pub mod types;

pub use store::ProjectStore;
pub use types::{NewProject, OwnerRef, Project, ProjectPatch};
