//! Router Module Index
//!
//! Routes are grouped by access level. The admin gate is applied as a route layer
//! on the gated group in `create_router`, so nothing in `admin_routes` can be
//! reached anonymously.

/// Pages open to every visitor, including the contact form.
pub mod public;

/// Login/logout plus the session-gated project management routes.
pub mod admin;
