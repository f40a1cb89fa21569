use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod auth;
pub mod config;
pub mod error;
pub mod flash;
pub mod handlers;
pub mod models;
pub mod password;
pub mod repository;
pub mod session;
pub mod views;

// Routing split by access level (public pages, admin area).
pub mod routes;
use auth::AdminSession;
use routes::{admin, public};

// --- Public Re-exports ---

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use password::{Argon2Hasher, HasherState};
pub use repository::{RepositoryState, SqliteRepository};
pub use session::{InMemorySessionStore, SessionState};

/// AppState
///
/// Everything a handler may touch, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    /// The relational store (projects, messages, users).
    pub repo: RepositoryState,
    /// Server-side session table backing the admin login.
    pub sessions: SessionState,
    /// Password scheme used for login and admin provisioning.
    pub hasher: HasherState,
    pub config: AppConfig,
}

impl AppState {
    /// initialize
    ///
    /// Opens the database named by `config`, creates missing tables, seeds the admin
    /// account if one is configured, and wires the default session store and hasher.
    pub async fn initialize(config: AppConfig) -> AppResult<Self> {
        let pool = repository::connect_pool(&config.db_url).await?;
        let sqlite = SqliteRepository::new(pool);
        sqlite.init_schema().await?;

        let state = AppState {
            repo: Arc::new(sqlite),
            sessions: Arc::new(InMemorySessionStore::new()),
            hasher: Arc::new(Argon2Hasher),
            config,
        };

        if let Some(seed) = &state.config.admin {
            bootstrap_admin(&state, seed).await?;
        }

        Ok(state)
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for SessionState {
    fn from_ref(app_state: &AppState) -> SessionState {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// bootstrap_admin
///
/// Creates the configured admin account unless the username already exists.
/// Returns `true` when a new account was written. An existing account is never
/// touched. A new username whose email belongs to another account violates the
/// `users.email` constraint and fails with `AppError::Database`, which aborts startup.
pub async fn bootstrap_admin(state: &AppState, seed: &config::AdminSeed) -> AppResult<bool> {
    if state
        .repo
        .find_user_by_username(&seed.username)
        .await?
        .is_some()
    {
        tracing::debug!(username = %seed.username, "admin account already present");
        return Ok(false);
    }

    let user = models::NewUser {
        username: seed.username.clone(),
        email: seed.email.clone(),
        password_hash: password::hash_blocking(&state.hasher, &seed.password).await?,
    };
    let created = state.repo.create_user(&user).await?;
    tracing::info!(user_id = created.id, username = %created.username, "admin account created");
    Ok(true)
}

/// auth_middleware
///
/// Route layer for the gated admin routes. Extracting `AdminSession` is the whole
/// check: an anonymous request is turned into the login redirect before any
/// handler (and so any store access) runs.
async fn auth_middleware(_admin: AdminSession, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles every route, applies the admin gate and the observability layers,
/// and registers the application state.
pub fn create_router(state: AppState) -> Router {
    let x_request_id = HeaderName::from_static("x-request-id");

    let admin_router = admin::session_routes().merge(admin::admin_routes().route_layer(
        middleware::from_fn_with_state(state.clone(), auth_middleware),
    ));

    let base_router = Router::new()
        .merge(public::public_routes())
        .nest("/admin", admin_router)
        .fallback(handlers::not_found)
        .with_state(state);

    base_router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Span for one request, tagged with method, URI and the `x-request-id` set above,
/// so every log line of a request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
