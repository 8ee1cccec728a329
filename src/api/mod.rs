/// HTTP API Layer
///
/// REST endpoints for the portfolio platform:
/// - User CRUD, search, and platform stats at /api/users/*
/// - Project CRUD and per-owner listing at /api/projects/*
/// - A closed error taxonomy mapped to distinct status codes

// User management endpoints
pub mod users;

// Project management endpoints
pub mod projects;

// Store-error to HTTP-response mapping
pub mod error;

use crate::mail::Mailer;
use crate::project::ProjectStore;
use crate::user::UserStore;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// User account store
    pub users: UserStore,
    /// Portfolio project store
    pub projects: ProjectStore,
    /// Best-effort outbound mail helper
    pub mailer: Mailer,
}

// Re-export router builders
pub use projects::create_project_routes;
pub use users::create_user_routes;
