//! Contact message module for folio.
//!
//! Public visitors submit messages through the contact form; admins read,
//! mark and delete them from the dashboard inbox.

mod repository;
mod service;
mod types;

pub use repository::ContactMessageRepository;
pub use service::{MessagePage, MessageService, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use types::{
    ContactMessage, NewContactMessage, MAX_MESSAGE_LENGTH, MAX_NAME_LENGTH, MAX_SUBJECT_LENGTH,
};
