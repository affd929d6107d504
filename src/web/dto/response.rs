//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

use crate::contact::ContactInfo;
use crate::message::{ContactMessage, MessagePage};
use crate::portfolio::{Experience, Profile, Project, Skill};

// ============================================================================
// Generic Response Wrapper
// ============================================================================

/// Success envelope wrapping every 2xx JSON body.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always true for success responses.
    pub success: bool,
    /// Response data.
    pub data: T,
    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new success response.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    /// Create a success response with a note for the client.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Auth DTOs
// ============================================================================

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// Admin account information.
    pub admin: AdminInfo,
}

/// Admin account information in responses.
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    /// Admin ID.
    pub id: i64,
    /// Login email.
    pub email: String,
}

/// Token refresh response.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// New access token.
    pub access_token: String,
    /// New refresh token.
    pub refresh_token: String,
    /// Expiry in seconds.
    pub expires_in: u64,
}

/// Current admin response (for /api/auth/me).
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Admin ID.
    pub id: i64,
    /// Login email.
    pub email: String,
    /// Account creation timestamp.
    pub created_at: String,
    /// Number of unread contact messages.
    pub unread_messages: i64,
}

/// Credential rotation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct CredentialsUpdatedResponse {
    /// New login email.
    pub email: String,
    /// Number of refresh sessions revoked by the rotation.
    pub revoked_sessions: u64,
}

// ============================================================================
// Contact Message DTOs
// ============================================================================

/// Contact message response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Message ID.
    pub id: i64,
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Whether an admin has read the message.
    pub is_read: bool,
    /// Submission timestamp.
    pub created_at: String,
}

impl From<ContactMessage> for MessageResponse {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

/// One page of the admin inbox.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageListData {
    /// Messages on this page, newest first.
    pub messages: Vec<MessageResponse>,
    /// Current page number (1-based).
    pub page: i64,
    /// Items per page.
    pub page_size: i64,
    /// Total number of messages.
    pub total: i64,
    /// Total number of pages.
    pub total_pages: i64,
}

impl From<MessagePage> for MessageListData {
    fn from(p: MessagePage) -> Self {
        Self {
            messages: p.messages.into_iter().map(MessageResponse::from).collect(),
            page: p.page,
            page_size: p.page_size,
            total: p.total,
            total_pages: p.total_pages,
        }
    }
}

/// Bulk update result.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedCountResponse {
    /// Number of rows updated.
    pub updated: u64,
}

/// Bulk delete result.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedCountResponse {
    /// Number of rows deleted.
    pub deleted: u64,
}

// ============================================================================
// Contact Info DTOs
// ============================================================================

/// Public contact details (visitor-facing subset).
#[derive(Debug, Serialize)]
pub struct PublicContactInfoResponse {
    /// Public contact email address.
    pub email: String,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// LinkedIn profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    /// GitHub profile URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl From<ContactInfo> for PublicContactInfoResponse {
    fn from(c: ContactInfo) -> Self {
        Self {
            email: c.email,
            phone: c.phone,
            linkedin: c.linkedin,
            github: c.github,
        }
    }
}

/// Full contact details (admin-facing).
#[derive(Debug, Serialize)]
pub struct ContactInfoResponse {
    /// Record ID.
    pub id: i64,
    /// Public contact email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// LinkedIn profile URL.
    pub linkedin: Option<String>,
    /// GitHub profile URL.
    pub github: Option<String>,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<ContactInfo> for ContactInfoResponse {
    fn from(c: ContactInfo) -> Self {
        Self {
            id: c.id,
            email: c.email,
            phone: c.phone,
            linkedin: c.linkedin,
            github: c.github,
            updated_at: c.updated_at,
        }
    }
}

// ============================================================================
// Portfolio DTOs
// ============================================================================

/// Profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Display name.
    pub name: String,
    /// One-line headline.
    pub headline: String,
    /// Longer biography.
    pub bio: String,
    /// Location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Avatar image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Resume download URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self {
            name: p.name,
            headline: p.headline,
            bio: p.bio,
            location: p.location,
            avatar_url: p.avatar_url,
            resume_url: p.resume_url,
            updated_at: p.updated_at,
        }
    }
}

/// Project response.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: i64,
    /// Project title.
    pub title: String,
    /// Project description.
    pub description: String,
    /// Technologies used.
    pub tech_stack: Vec<String>,
    /// Screenshot or cover image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Live demo URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    /// Source repository URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Whether the project is featured.
    pub featured: bool,
    /// Manual ordering weight.
    pub sort_order: i64,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            title: p.title,
            description: p.description,
            tech_stack: p.tech_stack,
            image_url: p.image_url,
            demo_url: p.demo_url,
            repo_url: p.repo_url,
            featured: p.featured,
            sort_order: p.sort_order,
            created_at: p.created_at,
        }
    }
}

/// Experience entry response.
#[derive(Debug, Serialize)]
pub struct ExperienceResponse {
    /// Entry ID.
    pub id: i64,
    /// Company name.
    pub company: String,
    /// Role title.
    pub role: String,
    /// Start date (YYYY-MM).
    pub start_date: String,
    /// End date (absent while the role is current).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    /// Role summary.
    pub summary: String,
    /// Notable achievements.
    pub achievements: Vec<String>,
    /// Manual ordering weight.
    pub sort_order: i64,
}

impl From<Experience> for ExperienceResponse {
    fn from(e: Experience) -> Self {
        Self {
            id: e.id,
            company: e.company,
            role: e.role,
            start_date: e.start_date,
            end_date: e.end_date,
            summary: e.summary,
            achievements: e.achievements,
            sort_order: e.sort_order,
        }
    }
}

/// Skill response.
#[derive(Debug, Serialize)]
pub struct SkillResponse {
    /// Skill ID.
    pub id: i64,
    /// Skill name.
    pub name: String,
    /// Category the skill is grouped under.
    pub category: String,
    /// Manual ordering weight within the category.
    pub sort_order: i64,
}

impl From<Skill> for SkillResponse {
    fn from(s: Skill) -> Self {
        Self {
            id: s.id,
            name: s.name,
            category: s.category,
            sort_order: s.sort_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let resp = ApiResponse::new(UpdatedCountResponse { updated: 3 });
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["success"], serde_json::json!(true));
        assert_eq!(value["data"]["updated"], serde_json::json!(3));
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_success_envelope_with_message() {
        let resp = ApiResponse::with_message(
            DeletedCountResponse { deleted: 2 },
            "2 messages deleted",
        );
        let value = serde_json::to_value(&resp).unwrap();

        assert_eq!(value["success"], serde_json::json!(true));
        assert_eq!(value["message"], serde_json::json!("2 messages deleted"));
    }

    #[test]
    fn test_message_page_conversion() {
        let page = MessagePage {
            messages: vec![ContactMessage {
                id: 1,
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                subject: "Hello".to_string(),
                message: "Hi there".to_string(),
                is_read: false,
                created_at: "2024-01-01 00:00:00".to_string(),
            }],
            total: 11,
            total_pages: 2,
            page: 1,
            page_size: 10,
        };

        let data = MessageListData::from(page);
        assert_eq!(data.messages.len(), 1);
        assert_eq!(data.messages[0].email, "ada@example.com");
        assert_eq!(data.total, 11);
        assert_eq!(data.total_pages, 2);
    }

    #[test]
    fn test_public_contact_info_drops_none_fields() {
        let info = ContactInfo {
            id: 1,
            email: "me@example.com".to_string(),
            phone: None,
            linkedin: Some("https://linkedin.com/in/me".to_string()),
            github: None,
            updated_at: "2024-01-01 00:00:00".to_string(),
        };

        let value = serde_json::to_value(PublicContactInfoResponse::from(info)).unwrap();
        assert_eq!(value["email"], serde_json::json!("me@example.com"));
        assert!(value.get("phone").is_none());
        assert!(value.get("updated_at").is_none());
    }
}
