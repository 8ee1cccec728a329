/// SQLite persistence layer for portfolio projects
///
/// Create resolves the submitted owner reference against the users table
/// before anything is written; update merges field-by-field; delete is
/// unconditional (authorization is not this layer's concern).

use crate::error::StoreError;
use crate::project::types::{NewProject, Project, ProjectPatch};
use sqlx::{sqlite::SqlitePool, Row};

/// SQLite-based project store
#[derive(Debug, Clone)]
pub struct ProjectStore {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl ProjectStore {
    /// Create a new store over an existing pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the projects schema
    ///
    /// The users table must exist first. The owner cascade is performed
    /// explicitly by the user store, so the reference carries no ON
    /// DELETE action.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                github_url TEXT,
                demo_url TEXT,
                readme_content TEXT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_projects_user_id ON projects(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a project for an existing owner
    ///
    /// The frontend submits a bare owner id; the real user is resolved
    /// here, failing with NotFound before any write happens.
    pub async fn create(&self, new_project: NewProject) -> Result<Project, StoreError> {
        let owner = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(new_project.user.id)
            .fetch_optional(&self.pool)
            .await?;
        if owner.is_none() {
            return Err(StoreError::NotFound("User not found".to_string()));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO projects (title, description, github_url, demo_url, readme_content, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_project.title)
        .bind(&new_project.description)
        .bind(&new_project.github_url)
        .bind(&new_project.demo_url)
        .bind(&new_project.readme_content)
        .bind(new_project.user.id)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::info!(
            "Created project {} ({}) for user {}",
            id,
            new_project.title,
            new_project.user.id
        );

        self.get(id).await
    }

    /// Fetch a project by id
    pub async fn get(&self, id: i64) -> Result<Project, StoreError> {
        let row = sqlx::query("SELECT * FROM projects WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(row_to_project(&row)),
            None => Err(StoreError::NotFound("Project not found".to_string())),
        }
    }

    /// List every project, no pagination (explorer page)
    pub async fn list_all(&self) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query("SELECT * FROM projects ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_project).collect())
    }

    /// List all projects owned by one user
    ///
    /// Unknown owner ids simply produce an empty list.
    pub async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Project>, StoreError> {
        let rows = sqlx::query("SELECT * FROM projects WHERE user_id = ? ORDER BY id")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(row_to_project).collect())
    }

    /// Apply a partial update
    ///
    /// Absent fields keep their stored value, explicit nulls clear. The
    /// owner never changes through this path.
    pub async fn update(&self, id: i64, patch: ProjectPatch) -> Result<Project, StoreError> {
        let mut project = self.get(id).await?;

        if let Some(title) = patch.title {
            project.title = title;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(github_url) = patch.github_url {
            project.github_url = github_url;
        }
        if let Some(demo_url) = patch.demo_url {
            project.demo_url = demo_url;
        }
        if let Some(readme_content) = patch.readme_content {
            project.readme_content = readme_content;
        }

        sqlx::query(
            r#"
            UPDATE projects
            SET title = ?, description = ?, github_url = ?, demo_url = ?,
                readme_content = ?, updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.github_url)
        .bind(&project.demo_url)
        .bind(&project.readme_content)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.get(id).await
    }

    /// Delete a project unconditionally
    ///
    /// No ownership check at this layer; unknown ids are a silent no-op.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::info!("Deleted project {}", id);
        Ok(())
    }
}

/// Map a projects row to the record type
fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Project {
    Project {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        github_url: row.get("github_url"),
        demo_url: row.get("demo_url"),
        readme_content: row.get("readme_content"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
