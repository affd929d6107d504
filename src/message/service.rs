//! Contact message service for folio.
//!
//! High-level operations over the message repository: validation guards,
//! 1-indexed pagination and the bulk inbox actions.

use validator::ValidateEmail;

use super::repository::ContactMessageRepository;
use super::types::{
    ContactMessage, NewContactMessage, MAX_MESSAGE_LENGTH, MAX_NAME_LENGTH, MAX_SUBJECT_LENGTH,
};
use crate::{Database, FolioError, Result};

/// Default number of messages per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of messages per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Validate a sender name.
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(FolioError::Validation("name is required".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(FolioError::Validation(format!(
            "name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a sender email address.
fn validate_email(email: &str) -> Result<()> {
    if !email.validate_email() {
        return Err(FolioError::Validation(
            "email address is not valid".to_string(),
        ));
    }
    Ok(())
}

/// Validate a message subject.
fn validate_subject(subject: &str) -> Result<()> {
    if subject.trim().is_empty() {
        return Err(FolioError::Validation("subject is required".to_string()));
    }
    if subject.chars().count() > MAX_SUBJECT_LENGTH {
        return Err(FolioError::Validation(format!(
            "subject must be at most {MAX_SUBJECT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate a message body.
fn validate_body(message: &str) -> Result<()> {
    if message.trim().is_empty() {
        return Err(FolioError::Validation("message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(FolioError::Validation(format!(
            "message must be at most {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/// One page of the dashboard inbox.
#[derive(Debug, Clone)]
pub struct MessagePage {
    /// Messages on this page, newest first.
    pub messages: Vec<ContactMessage>,
    /// Total number of messages across all pages.
    pub total: i64,
    /// Total number of pages at this page size.
    pub total_pages: i64,
    /// The 1-indexed page that was requested.
    pub page: i64,
    /// Page size used for this query.
    pub page_size: i64,
}

/// Service for contact message operations.
pub struct MessageService<'a> {
    db: &'a Database,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Store a message submitted through the public contact form.
    ///
    /// All fields are validated; the stored message starts unread with a
    /// server-assigned id and timestamp.
    pub async fn submit(&self, new_message: &NewContactMessage) -> Result<ContactMessage> {
        validate_name(&new_message.name)?;
        validate_email(&new_message.email)?;
        validate_subject(&new_message.subject)?;
        validate_body(&new_message.message)?;

        let repo = ContactMessageRepository::new(self.db.pool());
        repo.create(new_message).await
    }

    /// List one page of messages, newest first.
    ///
    /// `page` is 1-indexed; values below 1 are treated as 1. A page past
    /// the end returns an empty list rather than an error. `page_size`
    /// falls back to [`DEFAULT_PAGE_SIZE`] when out of range.
    pub async fn list(&self, page: i64, page_size: i64) -> Result<MessagePage> {
        let page = page.max(1);
        let page_size = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
            page_size
        } else {
            DEFAULT_PAGE_SIZE
        };

        let repo = ContactMessageRepository::new(self.db.pool());
        let total = repo.count().await?;
        let total_pages = (total + page_size - 1) / page_size;
        let offset = (page - 1) * page_size;
        let messages = repo.list_page(offset, page_size).await?;

        Ok(MessagePage {
            messages,
            total,
            total_pages,
            page,
            page_size,
        })
    }

    /// Set the read state of a message and return the updated row.
    ///
    /// Re-applying the current state succeeds as a no-op. An unknown id
    /// is a not-found error.
    pub async fn set_read_state(&self, id: i64, read: bool) -> Result<ContactMessage> {
        let repo = ContactMessageRepository::new(self.db.pool());
        if !repo.set_read(id, read).await? {
            return Err(FolioError::NotFound("message".to_string()));
        }
        repo.get_by_id(id)
            .await?
            .ok_or_else(|| FolioError::NotFound("message".to_string()))
    }

    /// Permanently delete a message.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let repo = ContactMessageRepository::new(self.db.pool());
        if !repo.delete(id).await? {
            return Err(FolioError::NotFound("message".to_string()));
        }
        Ok(())
    }

    /// Mark every listed message that exists as read.
    ///
    /// Ids with no matching message are skipped silently. Returns the
    /// number of messages actually updated.
    pub async fn bulk_mark_read(&self, ids: &[i64]) -> Result<u64> {
        let repo = ContactMessageRepository::new(self.db.pool());
        repo.set_read_many(ids, true).await
    }

    /// Delete every listed message that exists.
    ///
    /// Ids with no matching message are skipped silently. Returns the
    /// number of messages actually deleted.
    pub async fn bulk_delete(&self, ids: &[i64]) -> Result<u64> {
        let repo = ContactMessageRepository::new(self.db.pool());
        repo.delete_many(ids).await
    }

    /// Count unread messages for the dashboard badge.
    pub async fn unread_count(&self) -> Result<i64> {
        let repo = ContactMessageRepository::new(self.db.pool());
        repo.count_unread().await
    }
}
