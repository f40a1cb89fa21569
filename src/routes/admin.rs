use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Session Router
///
/// Login and logout, nested under `/admin` but outside the admin gate.
/// Logout is ungated: for an anonymous visitor it is a no-op.
pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(handlers::login_form).post(handlers::login))
        .route("/logout", get(handlers::logout))
}

/// Admin Router Module
///
/// Project management. `create_router` wraps this router in the auth route layer;
/// an anonymous request never reaches these handlers and is redirected to
/// `/admin/login` instead.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard
        // Lists every project with edit and delete links.
        .route("/dashboard", get(handlers::dashboard))
        // GET/POST /admin/project/add
        .route(
            "/project/add",
            get(handlers::add_project_form).post(handlers::add_project),
        )
        // GET/POST /admin/project/edit/{id}
        // Missing ids redirect back to the dashboard with a "not found" notice.
        .route(
            "/project/edit/{id}",
            get(handlers::edit_project_form).post(handlers::edit_project),
        )
        // GET /admin/project/delete/{id}
        // Permanent delete. A GET, because the dashboard links to it directly.
        .route("/project/delete/{id}", get(handlers::delete_project))
}
