use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without a session. Everything here is read-only except
/// `POST /contact`, which only ever inserts a message.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers and container orchestration.
        .route("/health", get(|| async { "ok" }))
        // GET /
        // Home page with the full project listing.
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        // GET /projects
        // The same listing as the home page.
        .route("/projects", get(handlers::projects))
        .route("/resume", get(handlers::resume))
        // GET/POST /contact
        // Shows the form; a POST validates and stores a message, then redirects back.
        .route(
            "/contact",
            get(handlers::contact_form).post(handlers::submit_contact),
        )
}
