/// Portfolio project type definitions
///
/// A project is a single published portfolio entry owned by exactly one
/// user. Requests carry the owner as a `{"user": {"id": N}}` reference;
/// responses expose the resolved owner as `user_id`.

use serde::{Deserialize, Serialize};

/// A stored portfolio project
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    /// Free-text readme, unbounded size
    pub readme_content: Option<String>,
    /// Owning user id, resolved server-side at creation and never changed
    pub user_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Owner reference as submitted by the frontend
///
/// Only the id is trusted; the rest of any embedded user object is
/// discarded and the real record is resolved from storage.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct OwnerRef {
    pub id: i64,
}

/// Project creation request body
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub readme_content: Option<String>,
    pub user: OwnerRef,
}

/// Partial update for project fields
///
/// Same patch convention as users: absent leaves the stored value, an
/// explicit null clears it. The owner cannot be changed through a patch.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub github_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub demo_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::patch::double_option")]
    pub readme_content: Option<Option<String>>,
}
