//! Web API module.
//!
//! REST API for the portfolio site: public content and contact form
//! endpoints plus the authenticated admin dashboard API.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
