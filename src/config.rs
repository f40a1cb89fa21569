use std::{env, net::SocketAddr};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://portfolio.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// The whole configuration, loaded once at startup and immutable afterwards.
/// Handlers reach it through `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // SQLite connection string.
    pub db_url: String,
    pub bind_addr: SocketAddr,
    // Runtime environment marker. Controls log format and cookie hardening.
    pub env: Env,
    // Optional admin account provisioned at startup.
    pub admin: Option<AdminSeed>,
}

/// Env
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// AdminSeed
///
/// Credentials for the out-of-band admin account, from `ADMIN_USERNAME`,
/// `ADMIN_EMAIL` and `ADMIN_PASSWORD`. The password is hashed before it is stored
/// and is never logged.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("BIND_ADDR is not a socket address: {0}")]
    InvalidBindAddr(String),
}

impl Default for AppConfig {
    /// Test-friendly configuration: a private in-memory database and no admin seed.
    fn default() -> Self {
        Self {
            db_url: "sqlite::memory:".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            env: Env::Local,
            admin: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from the environment. Local runs fall back to a
    /// `portfolio.db` file next to the binary; production refuses to start without
    /// an explicit `DATABASE_URL`.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let db_url = match (env, env::var("DATABASE_URL")) {
            (_, Ok(url)) => url,
            (Env::Local, Err(_)) => DEFAULT_DATABASE_URL.to_string(),
            (Env::Production, Err(_)) => return Err(ConfigError::Missing("DATABASE_URL")),
        };

        let raw_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(raw_addr))?;

        let admin = match (
            env::var("ADMIN_USERNAME"),
            env::var("ADMIN_EMAIL"),
            env::var("ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(email), Ok(password)) => Some(AdminSeed {
                username,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            db_url,
            bind_addr,
            env,
            admin,
        })
    }

    /// The session cookie is marked `Secure` only in production.
    pub fn secure_cookies(&self) -> bool {
        self.env == Env::Production
    }
}
