/// Closed error taxonomy for store operations
///
/// The upstream design collapsed every failure into one generic runtime
/// error; here each failure class keeps its own variant so the HTTP layer
/// can map them to distinct status codes.

use thiserror::Error;

/// Errors produced by the user and project stores
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// A unique field (email, username) is already taken
    #[error("{0}")]
    Conflict(String),

    /// The request payload failed validation before reaching storage
    #[error("{0}")]
    Validation(String),

    /// Underlying storage failure
    #[error("storage error: {0}")]
    Internal(#[from] sqlx::Error),
}

impl StoreError {
    /// Map a raw sqlx error from an INSERT into the taxonomy
    ///
    /// Unique-constraint violations become Conflict with the message the
    /// frontend already knows; everything else stays Internal. SQLite does
    /// not report constraint names through driver metadata, so the
    /// violated column list is parsed out of the error text.
    pub fn from_insert(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::Conflict(unique_conflict_message(db_err.message()).to_string());
            }
        }
        StoreError::Internal(err)
    }
}

/// Pick the user-facing conflict message for a unique violation
///
/// SQLite phrases the failure as "UNIQUE constraint failed: <column
/// list>"; the list is anchored and matched whole rather than searched
/// as a bare substring. Email is the fallback since it is the only
/// NOT NULL unique field.
fn unique_conflict_message(db_message: &str) -> &'static str {
    let columns = db_message
        .rsplit_once("UNIQUE constraint failed:")
        .map(|(_, columns)| columns.trim());
    match columns {
        Some("users.username") => "Username already taken!",
        _ => "Email already registered!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_formats_bare_message() {
        let err = StoreError::NotFound("User not found".to_string());
        assert_eq!(err.to_string(), "User not found");
    }

    #[test]
    fn conflict_formats_bare_message() {
        let err = StoreError::Conflict("Email already registered!".to_string());
        assert_eq!(err.to_string(), "Email already registered!");
    }

    #[test]
    fn unique_violation_column_list_selects_the_message() {
        assert_eq!(
            unique_conflict_message("UNIQUE constraint failed: users.username"),
            "Username already taken!"
        );
        assert_eq!(
            unique_conflict_message("UNIQUE constraint failed: users.email"),
            "Email already registered!"
        );
        // Error code prefix as surfaced by the driver
        assert_eq!(
            unique_conflict_message("(code: 2067) UNIQUE constraint failed: users.username"),
            "Username already taken!"
        );
        // Unrecognized shapes fall back to the email message
        assert_eq!(
            unique_conflict_message("something else entirely"),
            "Email already registered!"
        );
    }
}
