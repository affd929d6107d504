//! API handlers for Web UI.

pub mod auth;
pub mod contact_info;
pub mod credentials;
pub mod messages;
pub mod portfolio;

pub use auth::*;
pub use contact_info::*;
pub use credentials::*;
pub use messages::*;
pub use portfolio::*;
