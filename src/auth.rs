use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;

use crate::{
    error::{AppError, AppResult, AuthError},
    password::{self, HasherState},
    repository::Repository,
    session::{self, SessionState, SessionStore, SessionToken},
};

/// AdminSession Extractor Result
///
/// The resolved identity of an authenticated admin request. Handlers that take
/// this as an argument can only run for a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub token: SessionToken,
    pub user_id: i64,
}

/// AdminSession Extractor Implementation
///
/// 1. Reads the session cookie from the request headers.
/// 2. Resolves the token in the server-side `SessionStore`.
///
/// Rejection: `AppError::LoginRequired`, which renders as a redirect to
/// `/admin/login` with the "Please login first!" notice. The rejection happens
/// before the handler body, so no store access takes place.
impl<S> FromRequestParts<S> for AdminSession
where
    S: Send + Sync,
    SessionState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let sessions = SessionState::from_ref(state);
        let jar = CookieJar::from_headers(&parts.headers);

        let token = session::token_from_jar(&jar).ok_or(AppError::LoginRequired)?;
        let data = sessions
            .get(&token)
            .await
            .ok_or(AppError::LoginRequired)?;

        Ok(AdminSession {
            token,
            user_id: data.user_id,
        })
    }
}

/// is_authenticated
///
/// `true` when the jar holds a session cookie that resolves to a live session.
pub async fn is_authenticated(sessions: &dyn SessionStore, jar: &CookieJar) -> bool {
    match session::token_from_jar(jar) {
        Some(token) => sessions.get(&token).await.is_some(),
        None => false,
    }
}

/// login
///
/// Looks the admin up by exact username and checks the password against the stored
/// hash on the blocking pool. On success a new server-side session is opened and
/// its token returned.
pub async fn login(
    repo: &dyn Repository,
    hasher: &HasherState,
    sessions: &dyn SessionStore,
    username: &str,
    plain_password: &str,
) -> AppResult<SessionToken> {
    let Some(user) = repo.find_user_by_username(username).await? else {
        return Err(AuthError::InvalidCredentials.into());
    };

    if !password::verify_blocking(hasher, plain_password, &user.password_hash).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let token = sessions.create(user.id).await?;
    tracing::info!(user_id = user.id, "admin logged in");
    Ok(token)
}

/// logout
///
/// Drops the server-side session (if any) and clears the cookie. Safe to call
/// when nobody is logged in.
pub async fn logout(sessions: &dyn SessionStore, jar: CookieJar) -> CookieJar {
    if let Some(token) = session::token_from_jar(&jar) {
        if let Some(ended) = sessions.remove(&token).await {
            let lasted = Utc::now() - ended.created_at;
            tracing::info!(
                user_id = ended.user_id,
                session_secs = lasted.num_seconds(),
                "admin logged out"
            );
        }
    }
    jar.remove(session::session_removal_cookie())
}
