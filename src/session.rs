use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    fmt,
    str::FromStr,
    sync::{Arc, RwLock},
};
use uuid::Uuid;

pub const SESSION_COOKIE_NAME: &str = "portfolio_session";

/// SessionToken
///
/// The opaque value handed to the browser. It carries no identity by itself;
/// the identity lives only in the server-side `SessionStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// SessionData
///
/// What an authenticated session remembers: which admin logged in, and when.
/// `created_at` is reported when the session ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// SessionError
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The session table can no longer be written.
    #[error("session store unavailable")]
    Unavailable,
}

// 1. SessionStore Contract
/// SessionStore
///
/// Server-side table from session token to admin identity. The auth gate only
/// talks to this trait, so the in-memory table can be replaced by a shared store
/// without touching handlers.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Starts a session for `user_id` under a fresh token. The token is only
    /// returned once the session is recorded.
    async fn create(&self, user_id: i64) -> Result<SessionToken, SessionError>;

    async fn get(&self, token: &SessionToken) -> Option<SessionData>;

    /// Ends the session and returns what it held. `None` if the token was not live.
    async fn remove(&self, token: &SessionToken) -> Option<SessionData>;
}

/// SessionState
///
/// The shared handle stored in `AppState`.
pub type SessionState = Arc<dyn SessionStore>;

// 2. In-process implementation
/// InMemorySessionStore
///
/// Sessions live until logout or process exit. No expiry is applied.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionToken, SessionData>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, user_id: i64) -> Result<SessionToken, SessionError> {
        let token = SessionToken::generate();
        let data = SessionData {
            user_id,
            created_at: Utc::now(),
        };

        let mut sessions = self.sessions.write().map_err(|_| {
            tracing::error!("session table lock poisoned");
            SessionError::Unavailable
        })?;
        sessions.insert(token, data);

        Ok(token)
    }

    async fn get(&self, token: &SessionToken) -> Option<SessionData> {
        self.sessions
            .read()
            .ok()
            .and_then(|sessions| sessions.get(token).cloned())
    }

    async fn remove(&self, token: &SessionToken) -> Option<SessionData> {
        self.sessions
            .write()
            .ok()
            .and_then(|mut sessions| sessions.remove(token))
    }
}

// 3. Cookie helpers

/// The cookie that carries `token`. No max-age, so it ends with the browser session.
pub fn session_cookie(token: SessionToken, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// A cookie that, passed to `CookieJar::remove`, clears the session cookie.
pub fn session_removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, "")).path("/").build()
}

/// The token in the request's session cookie, if it is present and well-formed.
pub fn token_from_jar(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(SESSION_COOKIE_NAME)
        .and_then(|cookie| cookie.value().parse().ok())
}
