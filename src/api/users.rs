/// User REST API endpoints
///
/// Registration, lookup, search, partial update, deletion, and platform
/// stats under /api/users. Payloads are validated here before touching
/// the store layer.

use crate::api::{error::ApiError, AppState};
use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::Deserialize;

/// Maximum accepted bio length, matching the stored column bound
const MAX_BIO_LEN: usize = 500;

/// Query string for GET /api/users/find
#[derive(Debug, Deserialize)]
pub struct FindByEmailQuery {
    pub email: String,
}

/// Query string for GET /api/users/search
#[derive(Debug, Deserialize)]
pub struct SearchByNameQuery {
    pub name: String,
}

/// Create user management routes
///
/// The static paths (/stats, /find, /search, /register, /add) coexist
/// with the /{id} captures; axum matches static segments first.
pub fn create_user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users/register", post(register_user))
        .route("/api/users/add", post(register_user))
        .route("/api/users", get(list_users))
        .route("/api/users/find", get(find_user_by_email))
        .route("/api/users/search", get(search_users_by_name))
        .route("/api/users/stats", get(app_stats))
        .route("/api/users/{id}", get(get_user))
        .route("/api/users/{id}", put(update_user))
        .route("/api/users/{id}", delete(delete_user))
        .route("/api/users/u/{username}", get(get_user_by_username))
}

/// Register a new user
///
/// POST /api/users/register (also mounted at /add for the admin manual path)
/// Body: { "name": "...", "email": "...", "username": ..., ... }
async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<crate::user::NewUser>,
) -> Result<Json<crate::user::User>, ApiError> {
    validate_new_user(&payload)?;

    let user = state.users.register(payload).await?;
    Ok(Json(user))
}

/// Validate a registration payload before it reaches the store layer
fn validate_new_user(payload: &crate::user::NewUser) -> Result<(), ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Name must not be empty"));
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        return Err(ApiError::validation("A valid email address is required"));
    }
    if let Some(bio) = &payload.bio {
        if bio.chars().count() > MAX_BIO_LEN {
            return Err(ApiError::validation("Bio must be at most 500 characters"));
        }
    }
    Ok(())
}

/// Validate a profile patch before it reaches the store layer
fn validate_user_patch(patch: &crate::user::UserPatch) -> Result<(), ApiError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(ApiError::validation("Name must not be empty"));
        }
    }
    if let Some(Some(bio)) = &patch.bio {
        if bio.chars().count() > MAX_BIO_LEN {
            return Err(ApiError::validation("Bio must be at most 500 characters"));
        }
    }
    Ok(())
}

/// List all users
///
/// GET /api/users
async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<crate::user::User>>, ApiError> {
    let users = state.users.list_all().await?;
    Ok(Json(users))
}

/// Find a user by exact email
///
/// GET /api/users/find?email=aditya@example.com
async fn find_user_by_email(
    State(state): State<AppState>,
    Query(query): Query<FindByEmailQuery>,
) -> Result<Json<crate::user::User>, ApiError> {
    let user = state.users.find_by_email(&query.email).await?;
    Ok(Json(user))
}

/// Search users by display-name substring
///
/// GET /api/users/search?name=aditya
async fn search_users_by_name(
    State(state): State<AppState>,
    Query(query): Query<SearchByNameQuery>,
) -> Result<Json<Vec<crate::user::User>>, ApiError> {
    let users = state.users.search_by_name(&query.name).await?;
    Ok(Json(users))
}

/// Platform totals for the admin dashboard
///
/// GET /api/users/stats
/// Returns: { "users": N, "projects": M }
async fn app_stats(State(state): State<AppState>) -> Result<Json<crate::user::Stats>, ApiError> {
    let stats = state.users.stats().await?;
    Ok(Json(stats))
}

/// Get a user by id
///
/// GET /api/users/:id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<crate::user::User>, ApiError> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

/// Get a user by username (public profile)
///
/// GET /api/users/u/:username
async fn get_user_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<crate::user::User>, ApiError> {
    let user = state.users.find_by_username(&username).await?;
    Ok(Json(user))
}

/// Partially update a user's profile
///
/// PUT /api/users/:id
/// Body: any subset of { "name": ..., "bio": ..., "usn": ... }
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<crate::user::UserPatch>,
) -> Result<Json<crate::user::User>, ApiError> {
    validate_user_patch(&patch)?;

    let user = state.users.update(id, patch).await?;
    Ok(Json(user))
}

/// Delete a user and cascade its projects
///
/// DELETE /api/users/:id
/// Returns an empty 200 response.
async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> Result<(), ApiError> {
    state.users.delete(id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{NewUser, UserPatch};
    use axum::http::StatusCode;

    fn valid_registration() -> NewUser {
        NewUser {
            name: "Aditya".to_string(),
            email: "aditya@example.com".to_string(),
            username: None,
            password: None,
            usn: None,
            role: None,
            bio: None,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_new_user(&valid_registration()).is_ok());
    }

    #[test]
    fn empty_name_is_rejected_with_400() {
        let mut payload = valid_registration();
        payload.name = "   ".to_string();
        let err = validate_new_user(&payload).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn email_without_at_sign_is_rejected_with_400() {
        let mut payload = valid_registration();
        payload.email = "not-an-email".to_string();
        let err = validate_new_user(&payload).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn oversized_bio_is_rejected_with_400() {
        let mut payload = valid_registration();
        payload.bio = Some("x".repeat(MAX_BIO_LEN + 1));
        let err = validate_new_user(&payload).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        payload.bio = Some("x".repeat(MAX_BIO_LEN));
        assert!(validate_new_user(&payload).is_ok());
    }

    #[test]
    fn patch_rejects_empty_name_and_oversized_bio() {
        let patch = UserPatch {
            name: Some(String::new()),
            ..UserPatch::default()
        };
        let err = validate_user_patch(&patch).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let patch = UserPatch {
            bio: Some(Some("x".repeat(MAX_BIO_LEN + 1))),
            ..UserPatch::default()
        };
        let err = validate_user_patch(&patch).unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        // Clearing the bio is not a length violation
        let patch = UserPatch {
            bio: Some(None),
            ..UserPatch::default()
        };
        assert!(validate_user_patch(&patch).is_ok());
    }
}
