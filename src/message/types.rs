//! Contact message types for folio.

/// Maximum length for the sender name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length for the message subject.
pub const MAX_SUBJECT_LENGTH: usize = 200;

/// Maximum length for the message body.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// A message submitted through the public contact form.
///
/// Everything except `is_read` is immutable after creation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactMessage {
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
    /// When the message was submitted.
    pub created_at: String,
}

/// New contact message for creation.
#[derive(Debug, Clone)]
pub struct NewContactMessage {
    /// Sender's name.
    pub name: String,
    /// Sender's email address.
    pub email: String,
    /// Message subject.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl NewContactMessage {
    /// Create a new contact message.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }
}
