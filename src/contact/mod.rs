//! Contact info module for folio.
//!
//! A single record holding the contact details shown on the public site.

mod repository;
mod types;

pub use repository::ContactInfoRepository;
pub use types::{ContactInfo, ContactInfoInput, MAX_PHONE_LENGTH};
