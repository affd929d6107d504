//! Request DTOs for Web API.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{
    blank_to_none, optional_phone, optional_url, year_month, year_month_or_empty,
};
use crate::contact::ContactInfoInput;
use crate::portfolio::{
    ExperienceUpdate, NewExperience, NewProject, NewSkill, ProfileInput, ProjectUpdate,
    SkillUpdate,
};

// ============================================================================
// Auth
// ============================================================================

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin email address.
    pub email: String,
    /// Password.
    pub password: String,
}

/// Logout request.
#[derive(Debug, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to invalidate.
    pub refresh_token: String,
}

/// Token refresh request.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Credential update request.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCredentialsRequest {
    /// Current password, verified before anything changes.
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    /// New sign-in email.
    #[validate(email(message = "A valid email address is required"))]
    pub new_email: String,
    /// New password.
    #[validate(length(
        min = 8,
        max = 128,
        message = "Password must be between 8 and 128 characters"
    ))]
    pub new_password: String,
}

// ============================================================================
// Contact messages
// ============================================================================

/// Public contact form submission.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ContactMessageRequest {
    /// Sender name.
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    /// Sender email address.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Subject line.
    #[validate(length(
        min = 1,
        max = 200,
        message = "Subject must be between 1 and 200 characters"
    ))]
    pub subject: String,
    /// Message body.
    #[validate(length(
        min = 1,
        max = 2000,
        message = "Message must be between 1 and 2000 characters"
    ))]
    pub message: String,
}

/// Query parameters for the admin message list.
#[derive(Debug, Default, Deserialize)]
pub struct ListMessagesQuery {
    /// 1-indexed page number.
    pub page: Option<i64>,
    /// Messages per page.
    pub page_size: Option<i64>,
}

/// Read-state change for a single message.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReadStateRequest {
    /// Desired read state.
    pub read: bool,
}

/// Id list for bulk message operations.
#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkIdsRequest {
    /// Message ids; unknown ids are skipped.
    pub ids: Vec<i64>,
}

// ============================================================================
// Contact info
// ============================================================================

/// Contact info replacement (admin).
///
/// Optional fields arrive as empty strings when cleared in the form.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactInfoRequest {
    /// Public contact email.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Phone number ("" clears it).
    #[serde(default)]
    #[validate(custom(function = "optional_phone"))]
    pub phone: String,
    /// LinkedIn URL ("" clears it).
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub linkedin: String,
    /// GitHub URL ("" clears it).
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub github: String,
}

impl ContactInfoRequest {
    /// Convert to the domain input, collapsing empty fields to absent.
    pub fn into_input(self) -> ContactInfoInput {
        ContactInfoInput {
            email: self.email,
            phone: Some(self.phone),
            linkedin: Some(self.linkedin),
            github: Some(self.github),
        }
        .normalized()
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Profile replacement (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    /// One-line headline.
    #[validate(length(
        min = 1,
        max = 200,
        message = "Headline must be between 1 and 200 characters"
    ))]
    pub headline: String,
    /// Biography.
    #[validate(length(min = 1, max = 5000, message = "Bio must be between 1 and 5000 characters"))]
    pub bio: String,
    /// Location ("" clears it).
    #[serde(default)]
    pub location: String,
    /// Avatar URL ("" clears it).
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub avatar_url: String,
    /// Resume URL ("" clears it).
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub resume_url: String,
}

impl ProfileRequest {
    /// Convert to the domain input.
    pub fn into_input(self) -> ProfileInput {
        ProfileInput {
            name: self.name,
            headline: self.headline,
            bio: self.bio,
            location: blank_to_none(self.location),
            avatar_url: blank_to_none(self.avatar_url),
            resume_url: blank_to_none(self.resume_url),
        }
    }
}

// ============================================================================
// Projects
// ============================================================================

/// New project (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    /// Project title.
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,
    /// Project description.
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Description must be between 1 and 5000 characters"
    ))]
    pub description: String,
    /// Technologies used.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Image URL ("" means none).
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub image_url: String,
    /// Demo URL ("" means none).
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub demo_url: String,
    /// Repository URL ("" means none).
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub repo_url: String,
    /// Featured flag.
    #[serde(default)]
    pub featured: bool,
    /// Ordering weight.
    #[serde(default)]
    pub sort_order: i64,
}

impl ProjectRequest {
    /// Convert to the domain input.
    pub fn into_new(self) -> NewProject {
        NewProject {
            title: self.title,
            description: self.description,
            tech_stack: self.tech_stack,
            image_url: blank_to_none(self.image_url),
            demo_url: blank_to_none(self.demo_url),
            repo_url: blank_to_none(self.repo_url),
            featured: self.featured,
            sort_order: self.sort_order,
        }
    }
}

/// Partial project update (admin). Omitted fields are left unchanged;
/// URL fields sent as "" are cleared.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ProjectUpdateRequest {
    /// New title.
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,
    /// New description.
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Description must be between 1 and 5000 characters"
    ))]
    pub description: Option<String>,
    /// New tech stack.
    pub tech_stack: Option<Vec<String>>,
    /// New image URL.
    #[validate(custom(function = "optional_url"))]
    pub image_url: Option<String>,
    /// New demo URL.
    #[validate(custom(function = "optional_url"))]
    pub demo_url: Option<String>,
    /// New repository URL.
    #[validate(custom(function = "optional_url"))]
    pub repo_url: Option<String>,
    /// New featured flag.
    pub featured: Option<bool>,
    /// New ordering weight.
    pub sort_order: Option<i64>,
}

impl ProjectUpdateRequest {
    /// Convert to the domain update.
    pub fn into_update(self) -> ProjectUpdate {
        ProjectUpdate {
            title: self.title,
            description: self.description,
            tech_stack: self.tech_stack,
            image_url: self.image_url.map(blank_to_none),
            demo_url: self.demo_url.map(blank_to_none),
            repo_url: self.repo_url.map(blank_to_none),
            featured: self.featured,
            sort_order: self.sort_order,
        }
    }
}

// ============================================================================
// Experience
// ============================================================================

/// New experience entry (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct ExperienceRequest {
    /// Company name.
    #[validate(length(
        min = 1,
        max = 200,
        message = "Company must be between 1 and 200 characters"
    ))]
    pub company: String,
    /// Role title.
    #[validate(length(min = 1, max = 200, message = "Role must be between 1 and 200 characters"))]
    pub role: String,
    /// Start date (YYYY-MM).
    #[validate(custom(function = "year_month"))]
    pub start_date: String,
    /// End date ("" while the role is current).
    #[serde(default)]
    #[validate(custom(function = "year_month_or_empty"))]
    pub end_date: String,
    /// Role summary.
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Summary must be between 1 and 5000 characters"
    ))]
    pub summary: String,
    /// Notable achievements.
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Ordering weight.
    #[serde(default)]
    pub sort_order: i64,
}

impl ExperienceRequest {
    /// Convert to the domain input.
    pub fn into_new(self) -> NewExperience {
        NewExperience {
            company: self.company,
            role: self.role,
            start_date: self.start_date,
            end_date: blank_to_none(self.end_date),
            summary: self.summary,
            achievements: self.achievements,
            sort_order: self.sort_order,
        }
    }
}

/// Partial experience update (admin). An end_date of "" marks the role
/// as current again.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ExperienceUpdateRequest {
    /// New company name.
    #[validate(length(
        min = 1,
        max = 200,
        message = "Company must be between 1 and 200 characters"
    ))]
    pub company: Option<String>,
    /// New role title.
    #[validate(length(min = 1, max = 200, message = "Role must be between 1 and 200 characters"))]
    pub role: Option<String>,
    /// New start date (YYYY-MM).
    #[validate(custom(function = "year_month"))]
    pub start_date: Option<String>,
    /// New end date.
    #[validate(custom(function = "year_month_or_empty"))]
    pub end_date: Option<String>,
    /// New summary.
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Summary must be between 1 and 5000 characters"
    ))]
    pub summary: Option<String>,
    /// New achievements list.
    pub achievements: Option<Vec<String>>,
    /// New ordering weight.
    pub sort_order: Option<i64>,
}

impl ExperienceUpdateRequest {
    /// Convert to the domain update.
    pub fn into_update(self) -> ExperienceUpdate {
        ExperienceUpdate {
            company: self.company,
            role: self.role,
            start_date: self.start_date,
            end_date: self.end_date.map(blank_to_none),
            summary: self.summary,
            achievements: self.achievements,
            sort_order: self.sort_order,
        }
    }
}

// ============================================================================
// Skills
// ============================================================================

/// New skill (admin).
#[derive(Debug, Deserialize, Validate)]
pub struct SkillRequest {
    /// Skill name.
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    /// Category the skill is grouped under.
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: String,
    /// Ordering weight.
    #[serde(default)]
    pub sort_order: i64,
}

impl SkillRequest {
    /// Convert to the domain input.
    pub fn into_new(self) -> NewSkill {
        NewSkill {
            name: self.name,
            category: self.category,
            sort_order: self.sort_order,
        }
    }
}

/// Partial skill update (admin).
#[derive(Debug, Default, Deserialize, Validate)]
pub struct SkillUpdateRequest {
    /// New name.
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    /// New category.
    #[validate(length(
        min = 1,
        max = 100,
        message = "Category must be between 1 and 100 characters"
    ))]
    pub category: Option<String>,
    /// New ordering weight.
    pub sort_order: Option<i64>,
}

impl SkillUpdateRequest {
    /// Convert to the domain update.
    pub fn into_update(self) -> SkillUpdate {
        SkillUpdate {
            name: self.name,
            category: self.category,
            sort_order: self.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_message_request_valid() {
        let req = ContactMessageRequest {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "I would like to talk.".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_contact_message_request_reports_every_field() {
        let req = ContactMessageRequest {
            name: String::new(),
            email: "not-an-email".to_string(),
            subject: String::new(),
            message: String::new(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_contact_info_request_normalizes_blanks() {
        let req = ContactInfoRequest {
            email: "hello@example.com".to_string(),
            phone: "  ".to_string(),
            linkedin: String::new(),
            github: "https://github.com/example".to_string(),
        };
        assert!(req.validate().is_ok());

        let input = req.into_input();
        assert!(input.phone.is_none());
        assert!(input.linkedin.is_none());
        assert_eq!(input.github.as_deref(), Some("https://github.com/example"));
    }

    #[test]
    fn test_project_update_request_clears_url_with_empty_string() {
        let req = ProjectUpdateRequest {
            demo_url: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        let update = req.into_update();
        assert_eq!(update.demo_url, Some(None));
        assert!(update.title.is_none());
    }

    #[test]
    fn test_experience_request_dates() {
        let req = ExperienceRequest {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            start_date: "2021-03".to_string(),
            end_date: String::new(),
            summary: "Built things".to_string(),
            achievements: vec![],
            sort_order: 0,
        };
        assert!(req.validate().is_ok());
        assert!(req.into_new().end_date.is_none());

        let bad = ExperienceRequest {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            start_date: "March 2021".to_string(),
            end_date: String::new(),
            summary: "Built things".to_string(),
            achievements: vec![],
            sort_order: 0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_update_credentials_request() {
        let req = UpdateCredentialsRequest {
            current_password: "oldPassword1".to_string(),
            new_email: "owner@example.com".to_string(),
            new_password: "newPassword1".to_string(),
        };
        assert!(req.validate().is_ok());

        let short = UpdateCredentialsRequest {
            current_password: "oldPassword1".to_string(),
            new_email: "owner@example.com".to_string(),
            new_password: "short".to_string(),
        };
        assert!(short.validate().is_err());
    }
}
