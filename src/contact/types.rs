//! Contact info types for folio.

/// Maximum length for the phone number.
pub const MAX_PHONE_LENGTH: usize = 20;

/// Contact details shown on the public site.
///
/// A singleton record; the id is always 1.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactInfo {
    /// Record ID (always 1).
    pub id: i64,
    /// Public contact email address.
    pub email: String,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// LinkedIn profile URL (optional).
    pub linkedin: Option<String>,
    /// GitHub profile URL (optional).
    pub github: Option<String>,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Input for replacing the contact info record.
#[derive(Debug, Clone)]
pub struct ContactInfoInput {
    /// Public contact email address.
    pub email: String,
    /// Phone number (optional).
    pub phone: Option<String>,
    /// LinkedIn profile URL (optional).
    pub linkedin: Option<String>,
    /// GitHub profile URL (optional).
    pub github: Option<String>,
}

impl ContactInfoInput {
    /// Create an input with only the required email set.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            phone: None,
            linkedin: None,
            github: None,
        }
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the LinkedIn URL.
    pub fn with_linkedin(mut self, linkedin: impl Into<String>) -> Self {
        self.linkedin = Some(linkedin.into());
        self
    }

    /// Set the GitHub URL.
    pub fn with_github(mut self, github: impl Into<String>) -> Self {
        self.github = Some(github.into());
        self
    }

    /// Collapse empty optional fields to None.
    ///
    /// Forms send cleared fields as empty strings; an empty string means
    /// "absent", never "invalid".
    pub fn normalized(mut self) -> Self {
        self.phone = self.phone.filter(|v| !v.trim().is_empty());
        self.linkedin = self.linkedin.filter(|v| !v.trim().is_empty());
        self.github = self.github.filter(|v| !v.trim().is_empty());
        self
    }
}
