//! Portfolio content repositories for folio.
//!
//! Profile, projects, experience and skills. List-valued columns
//! (tech_stack, achievements) are JSON arrays stored as TEXT; the
//! conversion happens here so callers only see `Vec<String>`.

use sqlx::QueryBuilder;

use super::types::{
    Experience, ExperienceUpdate, NewExperience, NewProject, NewSkill, Profile, ProfileInput,
    Project, ProjectUpdate, Skill, SkillUpdate,
};
use crate::db::DbPool;
use crate::{FolioError, Result};

#[cfg(feature = "sqlite")]
const SQL_NOW: &str = "datetime('now')";
#[cfg(feature = "postgres")]
const SQL_NOW: &str = "TO_CHAR(NOW(), 'YYYY-MM-DD HH24:MI:SS')";

/// Encode a string list as a JSON array for storage.
fn encode_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

/// Decode a JSON array column back into a string list.
///
/// Malformed stored JSON decodes to an empty list rather than failing
/// the whole query.
fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

/// Repository for the profile singleton.
pub struct ProfileRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Get the profile record, if it has been set.
    pub async fn get(&self) -> Result<Option<Profile>> {
        let result = sqlx::query_as::<_, Profile>(
            "SELECT id, name, headline, bio, location, avatar_url, resume_url, updated_at
             FROM profile WHERE id = 1",
        )
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Insert or replace the profile record.
    pub async fn upsert(&self, input: &ProfileInput) -> Result<Profile> {
        let sql = format!(
            "INSERT INTO profile (id, name, headline, bio, location, avatar_url, resume_url, updated_at)
             VALUES (1, $1, $2, $3, $4, $5, $6, {SQL_NOW})
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 headline = excluded.headline,
                 bio = excluded.bio,
                 location = excluded.location,
                 avatar_url = excluded.avatar_url,
                 resume_url = excluded.resume_url,
                 updated_at = excluded.updated_at
             RETURNING id, name, headline, bio, location, avatar_url, resume_url, updated_at"
        );
        let profile = sqlx::query_as::<_, Profile>(&sql)
            .bind(&input.name)
            .bind(&input.headline)
            .bind(&input.bio)
            .bind(&input.location)
            .bind(&input.avatar_url)
            .bind(&input.resume_url)
            .fetch_one(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(profile)
    }
}

/// Database row for a project, before JSON decoding.
#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: i64,
    title: String,
    description: String,
    tech_stack: String,
    image_url: Option<String>,
    demo_url: Option<String>,
    repo_url: Option<String>,
    featured: bool,
    sort_order: i64,
    created_at: String,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            tech_stack: decode_list(&row.tech_stack),
            image_url: row.image_url,
            demo_url: row.demo_url,
            repo_url: row.repo_url,
            featured: row.featured,
            sort_order: row.sort_order,
            created_at: row.created_at,
        }
    }
}

const PROJECT_COLUMNS: &str =
    "id, title, description, tech_stack, image_url, demo_url, repo_url, featured, sort_order, created_at";

/// Repository for portfolio projects.
pub struct ProjectRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ProjectRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all projects in display order.
    pub async fn list(&self) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             ORDER BY sort_order ASC, created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// List only featured projects, in display order.
    pub async fn list_featured(&self) -> Result<Vec<Project>> {
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects
             WHERE featured = $1
             ORDER BY sort_order ASC, created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(true)
            .fetch_all(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Project::from).collect())
    }

    /// Get a project by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(row.map(Project::from))
    }

    /// Insert a new project.
    pub async fn create(&self, project: &NewProject) -> Result<Project> {
        let sql = format!(
            "INSERT INTO projects
                 (title, description, tech_stack, image_url, demo_url, repo_url, featured, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {PROJECT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(&project.title)
            .bind(&project.description)
            .bind(encode_list(&project.tech_stack))
            .bind(&project.image_url)
            .bind(&project.demo_url)
            .bind(&project.repo_url)
            .bind(project.featured)
            .bind(project.sort_order)
            .fetch_one(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(row.into())
    }

    /// Apply a partial update to a project.
    ///
    /// Returns the updated project, or None if the project does not exist.
    /// An empty update returns the current record unchanged.
    pub async fn update(&self, id: i64, update: &ProjectUpdate) -> Result<Option<Project>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE projects SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("title = ");
            separated.push_bind_unseparated(title);
        }
        if let Some(ref description) = update.description {
            separated.push("description = ");
            separated.push_bind_unseparated(description);
        }
        if let Some(ref tech_stack) = update.tech_stack {
            separated.push("tech_stack = ");
            separated.push_bind_unseparated(encode_list(tech_stack));
        }
        if let Some(ref image_url) = update.image_url {
            separated.push("image_url = ");
            separated.push_bind_unseparated(image_url.clone());
        }
        if let Some(ref demo_url) = update.demo_url {
            separated.push("demo_url = ");
            separated.push_bind_unseparated(demo_url.clone());
        }
        if let Some(ref repo_url) = update.repo_url {
            separated.push("repo_url = ");
            separated.push_bind_unseparated(repo_url.clone());
        }
        if let Some(featured) = update.featured {
            separated.push("featured = ");
            separated.push_bind_unseparated(featured);
        }
        if let Some(sort_order) = update.sort_order {
            separated.push("sort_order = ");
            separated.push_bind_unseparated(sort_order);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a project. Returns true if a row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Database row for an experience entry, before JSON decoding.
#[derive(sqlx::FromRow)]
struct ExperienceRow {
    id: i64,
    company: String,
    role: String,
    start_date: String,
    end_date: Option<String>,
    summary: String,
    achievements: String,
    sort_order: i64,
}

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Self {
            id: row.id,
            company: row.company,
            role: row.role,
            start_date: row.start_date,
            end_date: row.end_date,
            summary: row.summary,
            achievements: decode_list(&row.achievements),
            sort_order: row.sort_order,
        }
    }
}

const EXPERIENCE_COLUMNS: &str =
    "id, company, role, start_date, end_date, summary, achievements, sort_order";

/// Repository for work experience entries.
pub struct ExperienceRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ExperienceRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all entries in display order (most recent role first).
    pub async fn list(&self) -> Result<Vec<Experience>> {
        let sql = format!(
            "SELECT {EXPERIENCE_COLUMNS} FROM experience
             ORDER BY sort_order ASC, start_date DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, ExperienceRow>(&sql)
            .fetch_all(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Experience::from).collect())
    }

    /// Get an entry by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Experience>> {
        let sql = format!("SELECT {EXPERIENCE_COLUMNS} FROM experience WHERE id = $1");
        let row = sqlx::query_as::<_, ExperienceRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(row.map(Experience::from))
    }

    /// Insert a new entry.
    pub async fn create(&self, entry: &NewExperience) -> Result<Experience> {
        let sql = format!(
            "INSERT INTO experience
                 (company, role, start_date, end_date, summary, achievements, sort_order)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {EXPERIENCE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ExperienceRow>(&sql)
            .bind(&entry.company)
            .bind(&entry.role)
            .bind(&entry.start_date)
            .bind(&entry.end_date)
            .bind(&entry.summary)
            .bind(encode_list(&entry.achievements))
            .bind(entry.sort_order)
            .fetch_one(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(row.into())
    }

    /// Apply a partial update to an entry.
    ///
    /// Returns the updated entry, or None if it does not exist. An empty
    /// update returns the current record unchanged.
    pub async fn update(&self, id: i64, update: &ExperienceUpdate) -> Result<Option<Experience>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE experience SET ");
        let mut separated = query.separated(", ");

        if let Some(ref company) = update.company {
            separated.push("company = ");
            separated.push_bind_unseparated(company);
        }
        if let Some(ref role) = update.role {
            separated.push("role = ");
            separated.push_bind_unseparated(role);
        }
        if let Some(ref start_date) = update.start_date {
            separated.push("start_date = ");
            separated.push_bind_unseparated(start_date);
        }
        if let Some(ref end_date) = update.end_date {
            separated.push("end_date = ");
            separated.push_bind_unseparated(end_date.clone());
        }
        if let Some(ref summary) = update.summary {
            separated.push("summary = ");
            separated.push_bind_unseparated(summary);
        }
        if let Some(ref achievements) = update.achievements {
            separated.push("achievements = ");
            separated.push_bind_unseparated(encode_list(achievements));
        }
        if let Some(sort_order) = update.sort_order {
            separated.push("sort_order = ");
            separated.push_bind_unseparated(sort_order);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete an entry. Returns true if a row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM experience WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}

/// Repository for skills.
pub struct SkillRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> SkillRepository<'a> {
    /// Create a new repository instance.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List all skills grouped by category, then by ordering weight.
    pub async fn list(&self) -> Result<Vec<Skill>> {
        let skills = sqlx::query_as::<_, Skill>(
            "SELECT id, name, category, sort_order FROM skills
             ORDER BY category ASC, sort_order ASC, name ASC",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(skills)
    }

    /// Get a skill by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Skill>> {
        let result = sqlx::query_as::<_, Skill>(
            "SELECT id, name, category, sort_order FROM skills WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Insert a new skill.
    pub async fn create(&self, skill: &NewSkill) -> Result<Skill> {
        let created = sqlx::query_as::<_, Skill>(
            "INSERT INTO skills (name, category, sort_order)
             VALUES ($1, $2, $3)
             RETURNING id, name, category, sort_order",
        )
        .bind(&skill.name)
        .bind(&skill.category)
        .bind(skill.sort_order)
        .fetch_one(self.pool)
        .await
        .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Apply a partial update to a skill.
    pub async fn update(&self, id: i64, update: &SkillUpdate) -> Result<Option<Skill>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE skills SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.name {
            separated.push("name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(ref category) = update.category {
            separated.push("category = ");
            separated.push_bind_unseparated(category);
        }
        if let Some(sort_order) = update.sort_order {
            separated.push("sort_order = ");
            separated.push_bind_unseparated(sort_order);
        }

        query.push(" WHERE id = ");
        query.push_bind(id);

        let result = query
            .build()
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Delete a skill. Returns true if a row was deleted.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| FolioError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
