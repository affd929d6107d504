//! Portfolio content types for folio.
//!
//! Profile, projects, experience and skills rendered on the public site
//! and managed from the dashboard. List-valued fields (tech stack,
//! achievements) are stored as JSON text columns.

/// The profile record shown on the landing page.
///
/// A singleton record; the id is always 1.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    /// Record ID (always 1).
    pub id: i64,
    /// Display name.
    pub name: String,
    /// One-line headline.
    pub headline: String,
    /// Longer biography.
    pub bio: String,
    /// Location (optional).
    pub location: Option<String>,
    /// Avatar image URL (optional).
    pub avatar_url: Option<String>,
    /// Resume download URL (optional).
    pub resume_url: Option<String>,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Input for replacing the profile record.
#[derive(Debug, Clone)]
pub struct ProfileInput {
    /// Display name.
    pub name: String,
    /// One-line headline.
    pub headline: String,
    /// Longer biography.
    pub bio: String,
    /// Location (optional).
    pub location: Option<String>,
    /// Avatar image URL (optional).
    pub avatar_url: Option<String>,
    /// Resume download URL (optional).
    pub resume_url: Option<String>,
}

impl ProfileInput {
    /// Create an input with the required fields set.
    pub fn new(
        name: impl Into<String>,
        headline: impl Into<String>,
        bio: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            headline: headline.into(),
            bio: bio.into(),
            location: None,
            avatar_url: None,
            resume_url: None,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the avatar URL.
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = Some(avatar_url.into());
        self
    }

    /// Set the resume URL.
    pub fn with_resume_url(mut self, resume_url: impl Into<String>) -> Self {
        self.resume_url = Some(resume_url.into());
        self
    }
}

/// A portfolio project.
#[derive(Debug, Clone)]
pub struct Project {
    /// Project ID.
    pub id: i64,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Technologies used.
    pub tech_stack: Vec<String>,
    /// Screenshot or cover image URL (optional).
    pub image_url: Option<String>,
    /// Live demo URL (optional).
    pub demo_url: Option<String>,
    /// Source repository URL (optional).
    pub repo_url: Option<String>,
    /// Whether the project is featured on the landing page.
    pub featured: bool,
    /// Manual ordering weight (lower sorts first).
    pub sort_order: i64,
    /// Creation timestamp.
    pub created_at: String,
}

/// New project for creation.
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Technologies used.
    pub tech_stack: Vec<String>,
    /// Screenshot or cover image URL (optional).
    pub image_url: Option<String>,
    /// Live demo URL (optional).
    pub demo_url: Option<String>,
    /// Source repository URL (optional).
    pub repo_url: Option<String>,
    /// Whether the project is featured.
    pub featured: bool,
    /// Manual ordering weight.
    pub sort_order: i64,
}

impl NewProject {
    /// Create a new project with the required fields.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tech_stack: vec![],
            image_url: None,
            demo_url: None,
            repo_url: None,
            featured: false,
            sort_order: 0,
        }
    }

    /// Set the tech stack.
    pub fn with_tech_stack(mut self, tech_stack: Vec<String>) -> Self {
        self.tech_stack = tech_stack;
        self
    }

    /// Set the demo URL.
    pub fn with_demo_url(mut self, demo_url: impl Into<String>) -> Self {
        self.demo_url = Some(demo_url.into());
        self
    }

    /// Set the repository URL.
    pub fn with_repo_url(mut self, repo_url: impl Into<String>) -> Self {
        self.repo_url = Some(repo_url.into());
        self
    }

    /// Mark the project as featured.
    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    /// Set the ordering weight.
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Partial update for a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectUpdate {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New tech stack.
    pub tech_stack: Option<Vec<String>>,
    /// New image URL (Some(None) clears it).
    pub image_url: Option<Option<String>>,
    /// New demo URL (Some(None) clears it).
    pub demo_url: Option<Option<String>>,
    /// New repository URL (Some(None) clears it).
    pub repo_url: Option<Option<String>>,
    /// New featured flag.
    pub featured: Option<bool>,
    /// New ordering weight.
    pub sort_order: Option<i64>,
}

impl ProjectUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a new tech stack.
    pub fn tech_stack(mut self, tech_stack: Vec<String>) -> Self {
        self.tech_stack = Some(tech_stack);
        self
    }

    /// Set or clear the image URL.
    pub fn image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    /// Set or clear the demo URL.
    pub fn demo_url(mut self, demo_url: Option<String>) -> Self {
        self.demo_url = Some(demo_url);
        self
    }

    /// Set or clear the repository URL.
    pub fn repo_url(mut self, repo_url: Option<String>) -> Self {
        self.repo_url = Some(repo_url);
        self
    }

    /// Set the featured flag.
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    /// Set the ordering weight.
    pub fn sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.tech_stack.is_none()
            && self.image_url.is_none()
            && self.demo_url.is_none()
            && self.repo_url.is_none()
            && self.featured.is_none()
            && self.sort_order.is_none()
    }
}

/// A work experience entry.
#[derive(Debug, Clone)]
pub struct Experience {
    /// Entry ID.
    pub id: i64,
    /// Company name.
    pub company: String,
    /// Role title.
    pub role: String,
    /// Start date (YYYY-MM).
    pub start_date: String,
    /// End date (None while the role is current).
    pub end_date: Option<String>,
    /// Role summary.
    pub summary: String,
    /// Notable achievements.
    pub achievements: Vec<String>,
    /// Manual ordering weight.
    pub sort_order: i64,
}

/// New experience entry for creation.
#[derive(Debug, Clone)]
pub struct NewExperience {
    /// Company name.
    pub company: String,
    /// Role title.
    pub role: String,
    /// Start date (YYYY-MM).
    pub start_date: String,
    /// End date (None while the role is current).
    pub end_date: Option<String>,
    /// Role summary.
    pub summary: String,
    /// Notable achievements.
    pub achievements: Vec<String>,
    /// Manual ordering weight.
    pub sort_order: i64,
}

impl NewExperience {
    /// Create a new entry with the required fields.
    pub fn new(
        company: impl Into<String>,
        role: impl Into<String>,
        start_date: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            start_date: start_date.into(),
            end_date: None,
            summary: summary.into(),
            achievements: vec![],
            sort_order: 0,
        }
    }

    /// Set the end date.
    pub fn with_end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    /// Set the achievements list.
    pub fn with_achievements(mut self, achievements: Vec<String>) -> Self {
        self.achievements = achievements;
        self
    }

    /// Set the ordering weight.
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Partial update for an experience entry.
#[derive(Debug, Clone, Default)]
pub struct ExperienceUpdate {
    /// New company name.
    pub company: Option<String>,
    /// New role title.
    pub role: Option<String>,
    /// New start date.
    pub start_date: Option<String>,
    /// New end date (Some(None) marks the role as current).
    pub end_date: Option<Option<String>>,
    /// New summary.
    pub summary: Option<String>,
    /// New achievements list.
    pub achievements: Option<Vec<String>>,
    /// New ordering weight.
    pub sort_order: Option<i64>,
}

impl ExperienceUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new company name.
    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    /// Set a new role title.
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set a new start date.
    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Set or clear the end date.
    pub fn end_date(mut self, end_date: Option<String>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Set a new summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set a new achievements list.
    pub fn achievements(mut self, achievements: Vec<String>) -> Self {
        self.achievements = Some(achievements);
        self
    }

    /// Set the ordering weight.
    pub fn sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.role.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.summary.is_none()
            && self.achievements.is_none()
            && self.sort_order.is_none()
    }
}

/// A skill shown in the skills grid.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Skill {
    /// Skill ID.
    pub id: i64,
    /// Skill name.
    pub name: String,
    /// Category the skill is grouped under.
    pub category: String,
    /// Manual ordering weight within the category.
    pub sort_order: i64,
}

/// New skill for creation.
#[derive(Debug, Clone)]
pub struct NewSkill {
    /// Skill name.
    pub name: String,
    /// Category the skill is grouped under.
    pub category: String,
    /// Manual ordering weight.
    pub sort_order: i64,
}

impl NewSkill {
    /// Create a new skill.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            sort_order: 0,
        }
    }

    /// Set the ordering weight.
    pub fn with_sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Partial update for a skill.
#[derive(Debug, Clone, Default)]
pub struct SkillUpdate {
    /// New name.
    pub name: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New ordering weight.
    pub sort_order: Option<i64>,
}

impl SkillUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a new name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set a new category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Set the ordering weight.
    pub fn sort_order(mut self, sort_order: i64) -> Self {
        self.sort_order = Some(sort_order);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.category.is_none() && self.sort_order.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_builder() {
        let project = NewProject::new("folio", "Portfolio backend")
            .with_tech_stack(vec!["Rust".to_string(), "SQLite".to_string()])
            .with_repo_url("https://github.com/example/folio")
            .featured()
            .with_sort_order(5);

        assert_eq!(project.title, "folio");
        assert_eq!(project.tech_stack.len(), 2);
        assert!(project.featured);
        assert_eq!(project.sort_order, 5);
        assert!(project.image_url.is_none());
    }

    #[test]
    fn test_project_update_builder() {
        let update = ProjectUpdate::new()
            .title("Renamed")
            .demo_url(None)
            .featured(false);

        assert!(update.title.is_some());
        assert_eq!(update.demo_url, Some(None));
        assert_eq!(update.featured, Some(false));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_project_update_empty() {
        assert!(ProjectUpdate::new().is_empty());
    }

    #[test]
    fn test_new_experience_builder() {
        let entry = NewExperience::new("Acme", "Backend Engineer", "2021-03", "Shipped things")
            .with_end_date("2023-08")
            .with_achievements(vec!["Cut p99 latency in half".to_string()]);

        assert_eq!(entry.company, "Acme");
        assert_eq!(entry.end_date.as_deref(), Some("2023-08"));
        assert_eq!(entry.achievements.len(), 1);
    }

    #[test]
    fn test_experience_update_marks_current() {
        let update = ExperienceUpdate::new().end_date(None);
        assert_eq!(update.end_date, Some(None));
        assert!(!update.is_empty());
    }

    #[test]
    fn test_skill_update_empty() {
        assert!(SkillUpdate::new().is_empty());
        assert!(!SkillUpdate::new().name("Rust").is_empty());
    }
}
