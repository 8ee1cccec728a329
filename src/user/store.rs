/// SQLite persistence layer for user accounts
///
/// Handles registration, lookup, search, partial update, and deletion with
/// the explicit owner cascade. Rows are mapped by hand to keep the schema
/// and the record type visibly in sync.

use crate::error::StoreError;
use crate::user::types::{NewUser, Role, Stats, User, UserPatch};
use sqlx::{sqlite::SqlitePool, Row};

/// SQLite-based user store
///
/// The configured admin email is injected at construction so role
/// promotion is an explicit input to registration rather than a hidden
/// global.
#[derive(Debug, Clone)]
pub struct UserStore {
    /// Shared SQLite connection pool
    pool: SqlitePool,
    /// Email address that registers as ADMIN (compared case-insensitively)
    admin_email: String,
}

impl UserStore {
    /// Create a new store over an existing pool
    pub fn new(pool: SqlitePool, admin_email: String) -> Self {
        Self { pool, admin_email }
    }

    /// Initialize the users schema
    ///
    /// Safe to call multiple times (uses IF NOT EXISTS). The UNIQUE
    /// constraints on email and username are the backstop for concurrent
    /// registrations racing past the application-level existence checks.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                username TEXT UNIQUE,
                password TEXT,
                usn TEXT,
                role TEXT NOT NULL DEFAULT 'STUDENT',
                bio TEXT,
                otp TEXT,
                verified INTEGER NOT NULL DEFAULT 0,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_name ON users(name)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Register a new account
    ///
    /// Fails with Conflict when the email or a supplied username is
    /// already taken. Verification is trusted from the upstream identity
    /// provider, so the record is stored verified with the OTP cleared.
    /// The existence checks are separate statements from the INSERT; two
    /// concurrent registrations can both pass them, and the UNIQUE
    /// constraint then surfaces the loser as Conflict.
    pub async fn register(&self, new_user: NewUser) -> Result<User, StoreError> {
        let email_row = sqlx::query("SELECT 1 FROM users WHERE email = ?")
            .bind(&new_user.email)
            .fetch_optional(&self.pool)
            .await?;
        if email_row.is_some() {
            return Err(StoreError::Conflict("Email already registered!".to_string()));
        }

        if let Some(username) = &new_user.username {
            let username_row = sqlx::query("SELECT 1 FROM users WHERE username = ?")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
            if username_row.is_some() {
                return Err(StoreError::Conflict("Username already taken!".to_string()));
            }
        }

        let role = if new_user.email.eq_ignore_ascii_case(&self.admin_email) {
            Role::Admin
        } else {
            new_user.role.unwrap_or(Role::Student)
        };

        let result = sqlx::query(
            r#"
            INSERT INTO users (name, email, username, password, usn, role, bio, otp, verified)
            VALUES (?, ?, ?, ?, ?, ?, ?, NULL, 1)
            "#,
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.usn)
        .bind(role.as_str())
        .bind(&new_user.bio)
        .execute(&self.pool)
        .await
        .map_err(StoreError::from_insert)?;

        let id = result.last_insert_rowid();
        tracing::info!("Registered user {} ({})", id, new_user.email);

        self.get(id).await
    }

    /// Fetch a user by id
    pub async fn get(&self, id: i64) -> Result<User, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row_to_user(&row)),
            None => Err(StoreError::NotFound("User not found".to_string())),
        }
    }

    /// Fetch a user by exact email (login path)
    pub async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row_to_user(&row)),
            None => Err(StoreError::NotFound("User not found".to_string())),
        }
    }

    /// Fetch a user by exact username (public profile path)
    pub async fn find_by_username(&self, username: &str) -> Result<User, StoreError> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row_to_user(&row)),
            None => Err(StoreError::NotFound("User not found".to_string())),
        }
    }

    /// List every user, no pagination (admin dashboard)
    pub async fn list_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_user).collect())
    }

    /// Case-insensitive substring search on display name
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<User>, StoreError> {
        let pattern = format!("%{}%", fragment);
        let rows = sqlx::query("SELECT * FROM users WHERE LOWER(name) LIKE LOWER(?) ORDER BY id")
            .bind(&pattern)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_user).collect())
    }

    /// Apply a partial update to the mutable profile fields
    ///
    /// Only name, bio, and usn can change; fields absent from the patch
    /// keep their stored value, an explicit null clears a nullable field.
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User, StoreError> {
        let mut user = self.get(id).await?;

        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(bio) = patch.bio {
            user.bio = bio;
        }
        if let Some(usn) = patch.usn {
            user.usn = usn;
        }

        sqlx::query(
            "UPDATE users SET name = ?, bio = ?, usn = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(&user.name)
        .bind(&user.bio)
        .bind(&user.usn)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    /// Delete a user and every project it owns
    ///
    /// The owner cascade is one transaction: projects first, then the
    /// user row. Deleting an unknown id is a silent no-op.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let projects = sqlx::query("DELETE FROM projects WHERE user_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "Deleted user {} and {} owned projects",
            id,
            projects.rows_affected()
        );

        Ok(())
    }

    /// Platform totals for the admin dashboard
    ///
    /// Two independent counts; concurrent writes between them can skew
    /// the pair.
    pub async fn stats(&self) -> Result<Stats, StoreError> {
        let users_row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(&self.pool)
            .await?;
        let projects_row = sqlx::query("SELECT COUNT(*) AS n FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(Stats {
            users: users_row.get("n"),
            projects: projects_row.get("n"),
        })
    }
}

/// Map a users row to the record type
fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        username: row.get("username"),
        password: row.get("password"),
        usn: row.get("usn"),
        role: Role::from_db(&role),
        bio: row.get("bio"),
        otp: row.get("otp"),
        verified: row.get("verified"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::store::ProjectStore;
    use crate::project::types::{NewProject, OwnerRef};
    use sqlx::sqlite::SqlitePoolOptions;

    const ADMIN_EMAIL: &str = "admin@studentfolio.dev";

    async fn test_stores() -> (UserStore, ProjectStore) {
        // Single connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let users = UserStore::new(pool.clone(), ADMIN_EMAIL.to_string());
        users.init_schema().await.unwrap();
        let projects = ProjectStore::new(pool);
        projects.init_schema().await.unwrap();
        (users, projects)
    }

    fn new_user(name: &str, email: &str) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            username: None,
            password: None,
            usn: None,
            role: None,
            bio: None,
        }
    }

    #[tokio::test]
    async fn register_assigns_id_and_forces_verified() {
        let (users, _) = test_stores().await;
        let stored = users
            .register(new_user("Aditya", "aditya@example.com"))
            .await
            .unwrap();

        assert!(stored.id > 0);
        assert!(stored.verified);
        assert_eq!(stored.otp, None);
        assert_eq!(stored.role, Role::Student);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_and_persists_once() {
        let (users, _) = test_stores().await;
        users
            .register(new_user("First", "dup@example.com"))
            .await
            .unwrap();

        let err = users
            .register(new_user("Second", "dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(err.to_string(), "Email already registered!");

        let all = users.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "First");
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let (users, _) = test_stores().await;
        let mut first = new_user("First", "a@example.com");
        first.username = Some("taken".to_string());
        users.register(first).await.unwrap();

        let mut second = new_user("Second", "b@example.com");
        second.username = Some("taken".to_string());
        let err = users.register(second).await.unwrap_err();
        assert_eq!(err.to_string(), "Username already taken!");
    }

    #[tokio::test]
    async fn admin_email_promotes_role_case_insensitively() {
        let (users, _) = test_stores().await;
        let admin = users
            .register(new_user("Root", "Admin@Studentfolio.DEV"))
            .await
            .unwrap();
        assert_eq!(admin.role, Role::Admin);

        let student = users
            .register(new_user("Plain", "plain@example.com"))
            .await
            .unwrap();
        assert_eq!(student.role, Role::Student);
    }

    #[tokio::test]
    async fn explicit_role_survives_registration() {
        let (users, _) = test_stores().await;
        let mut req = new_user("Staff", "staff@example.com");
        req.role = Some(Role::Admin);
        let stored = users.register(req).await.unwrap();
        assert_eq!(stored.role, Role::Admin);
    }

    #[tokio::test]
    async fn bio_only_patch_leaves_other_fields() {
        let (users, _) = test_stores().await;
        let mut req = new_user("Aditya", "aditya@example.com");
        req.username = Some("aditya".to_string());
        req.usn = Some("1MS21CS001".to_string());
        let stored = users.register(req).await.unwrap();

        let patch = UserPatch {
            bio: Some(Some("Systems programmer".to_string())),
            ..UserPatch::default()
        };
        let updated = users.update(stored.id, patch).await.unwrap();

        assert_eq!(updated.bio.as_deref(), Some("Systems programmer"));
        assert_eq!(updated.name, "Aditya");
        assert_eq!(updated.email, "aditya@example.com");
        assert_eq!(updated.username.as_deref(), Some("aditya"));
        assert_eq!(updated.usn.as_deref(), Some("1MS21CS001"));
    }

    #[tokio::test]
    async fn explicit_null_clears_usn_but_absent_keeps_it() {
        let (users, _) = test_stores().await;
        let mut req = new_user("Aditya", "aditya@example.com");
        req.usn = Some("1MS21CS001".to_string());
        let stored = users.register(req).await.unwrap();

        // Absent usn: untouched
        let patch = UserPatch {
            name: Some("Aditya K".to_string()),
            ..UserPatch::default()
        };
        let updated = users.update(stored.id, patch).await.unwrap();
        assert_eq!(updated.usn.as_deref(), Some("1MS21CS001"));

        // Explicit null: cleared
        let patch = UserPatch {
            usn: Some(None),
            ..UserPatch::default()
        };
        let updated = users.update(stored.id, patch).await.unwrap();
        assert_eq!(updated.usn, None);
        assert_eq!(updated.name, "Aditya K");
    }

    #[tokio::test]
    async fn update_missing_user_is_not_found() {
        let (users, _) = test_stores().await;
        let err = users.update(999, UserPatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_cascades_owned_projects() {
        let (users, projects) = test_stores().await;
        let owner = users
            .register(new_user("Owner", "owner@example.com"))
            .await
            .unwrap();
        let other = users
            .register(new_user("Other", "other@example.com"))
            .await
            .unwrap();

        for title in ["one", "two"] {
            projects
                .create(NewProject {
                    title: title.to_string(),
                    description: None,
                    github_url: None,
                    demo_url: None,
                    readme_content: None,
                    user: OwnerRef { id: owner.id },
                })
                .await
                .unwrap();
        }
        projects
            .create(NewProject {
                title: "kept".to_string(),
                description: None,
                github_url: None,
                demo_url: None,
                readme_content: None,
                user: OwnerRef { id: other.id },
            })
            .await
            .unwrap();

        users.delete(owner.id).await.unwrap();

        assert!(matches!(
            users.get(owner.id).await.unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(projects.list_by_owner(owner.id).await.unwrap().is_empty());
        assert_eq!(projects.list_by_owner(other.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn search_matches_name_substring_case_insensitively() {
        let (users, _) = test_stores().await;
        users
            .register(new_user("Aditya Kumar", "a@example.com"))
            .await
            .unwrap();
        users
            .register(new_user("Bhavana", "b@example.com"))
            .await
            .unwrap();

        let hits = users.search_by_name("aDiTy").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Aditya Kumar");

        assert!(users.search_by_name("zz").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_by_email_and_username_are_exact() {
        let (users, _) = test_stores().await;
        let mut req = new_user("Aditya", "aditya@example.com");
        req.username = Some("aditya".to_string());
        users.register(req).await.unwrap();

        let found = users.find_by_email("aditya@example.com").await.unwrap();
        assert_eq!(found.name, "Aditya");
        let found = users.find_by_username("aditya").await.unwrap();
        assert_eq!(found.email, "aditya@example.com");

        assert!(matches!(
            users.find_by_email("missing@example.com").await.unwrap_err(),
            StoreError::NotFound(_)
        ));
        assert!(matches!(
            users.find_by_username("missing").await.unwrap_err(),
            StoreError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn stats_counts_users_and_projects() {
        let (users, projects) = test_stores().await;
        let u1 = users.register(new_user("A", "a@example.com")).await.unwrap();
        users.register(new_user("B", "b@example.com")).await.unwrap();

        projects
            .create(NewProject {
                title: "p".to_string(),
                description: None,
                github_url: None,
                demo_url: None,
                readme_content: None,
                user: OwnerRef { id: u1.id },
            })
            .await
            .unwrap();

        let stats = users.stats().await.unwrap();
        assert_eq!(stats.users, 2);
        assert_eq!(stats.projects, 1);
    }
}
