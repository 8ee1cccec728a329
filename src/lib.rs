/// Studentfolio: record-management backend for a student portfolio platform
///
/// This library provides the REST backend for user accounts and the
/// projects they publish: registration, lookup, search, partial update,
/// deletion with owner cascade, and a best-effort mail helper.

// Core configuration and setup
pub mod config;

// Closed error taxonomy shared by the stores and the HTTP layer
pub mod error;

// Double-option deserialization for patch fields
pub mod patch;

// User account entity - types and SQLite persistence
pub mod user;

// Portfolio project entity - types and SQLite persistence
pub mod project;

// Outbound mail helper (fire-and-log)
pub mod mail;

// HTTP API layer - REST endpoints for users and projects
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use error::StoreError;
pub use project::{NewProject, Project, ProjectPatch, ProjectStore};
pub use server::start_server;
pub use user::{NewUser, Role, User, UserPatch, UserStore};
