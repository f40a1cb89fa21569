use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    flash::{FlashRedirect, Notice},
    models::ValidationError,
    session::SessionError,
    views,
};

/// AuthError
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Unknown username or wrong password; callers cannot tell which.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// AppError
///
/// Everything a handler can fail with. Each variant is recovered at the handler
/// boundary: user-facing failures become a redirect with a flash notice, store
/// and hashing failures become a logged 500 page.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("contact form rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("admin session required")]
    LoginRequired,

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn project_not_found(id: i64) -> Self {
        AppError::NotFound {
            entity: "project",
            id,
        }
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(err: argon2::password_hash::Error) -> Self {
        AppError::PasswordHash(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(err) => {
                tracing::warn!(reason = %err, "contact form rejected");
                FlashRedirect::new(Notice::FormInvalid, "/contact").into_response()
            }
            AppError::Auth(_) => {
                tracing::warn!("login failed");
                FlashRedirect::new(Notice::InvalidCredentials, "/admin/login").into_response()
            }
            AppError::LoginRequired => {
                tracing::info!("anonymous request to admin route");
                FlashRedirect::new(Notice::LoginRequired, "/admin/login").into_response()
            }
            AppError::NotFound { entity, id } => {
                tracing::info!(entity, id, "resource not found");
                FlashRedirect::new(Notice::ProjectNotFound, "/admin/dashboard").into_response()
            }
            AppError::Database(_) | AppError::PasswordHash(_) | AppError::Session(_) => {
                tracing::error!("{}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, views::server_error()).into_response()
            }
        }
    }
}
