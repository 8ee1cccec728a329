/// User account type definitions
///
/// Mirrors the portfolio platform's account record: identity, credentials,
/// role, bio, and the (bypassed) email-verification fields.

use serde::{Deserialize, Serialize};

/// Account role stored on every user
///
/// Defaults to STUDENT at registration; the configured admin email address
/// promotes the account to ADMIN instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    /// Database representation ("STUDENT" / "ADMIN")
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse the stored role column, falling back to STUDENT for anything
    /// unrecognized (legacy rows stored the role as free text)
    pub fn from_db(value: &str) -> Role {
        match value {
            "ADMIN" => Role::Admin,
            _ => Role::Student,
        }
    }
}

/// A stored user account
///
/// The password field is carried verbatim from the request with no hashing,
/// matching the upstream data model; see DESIGN.md for the security note.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// University seat number
    pub usn: Option<String>,
    pub role: Role,
    pub bio: Option<String>,
    /// One-time passcode for email verification; cleared at registration
    /// because verification is delegated to the upstream identity provider
    pub otp: Option<String>,
    pub verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Registration request body
///
/// Role is optional: absent means STUDENT unless the email matches the
/// configured admin address.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub usn: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Partial update for the mutable profile fields (name, bio, usn)
///
/// The double-option fields distinguish "absent" (leave the stored value
/// untouched) from an explicit null (clear the stored value). Name is a
/// non-nullable column, so it only supports replacement.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub bio: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub usn: Option<Option<String>>,
}

/// Platform totals for the admin dashboard
///
/// The two counts are read independently, not as one consistent snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Stats {
    pub users: i64,
    pub projects: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_from_null() {
        let patch: UserPatch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.name, None);
        assert_eq!(patch.bio, None);
        assert_eq!(patch.usn, None);

        let patch: UserPatch = serde_json::from_str(r#"{"bio": null}"#).unwrap();
        assert_eq!(patch.bio, Some(None));
        assert_eq!(patch.usn, None);
        assert_eq!(patch.name, None);

        let patch: UserPatch = serde_json::from_str(r#"{"usn": "1MS21CS001"}"#).unwrap();
        assert_eq!(patch.usn, Some(Some("1MS21CS001".to_string())));
        assert_eq!(patch.bio, None);
    }

    #[test]
    fn role_round_trips_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
        let role: Role = serde_json::from_str(r#""STUDENT""#).unwrap();
        assert_eq!(role, Role::Student);
        assert_eq!(Role::from_db("ADMIN"), Role::Admin);
        assert_eq!(Role::from_db("moderator"), Role::Student);
    }
}
