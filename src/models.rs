use serde::Deserialize;
use sqlx::FromRow;

// --- Stored Records (Mapped to Database) ---

/// User
///
/// An admin account from the `users` table. Accounts are provisioned out-of-band
/// (see `bootstrap_admin` in `lib.rs`); nothing in the HTTP surface creates or edits them.
#[derive(Debug, Clone, FromRow, Default)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Argon2id PHC string. The SQL column is named `password`.
    #[sqlx(rename = "password")]
    pub password_hash: String,
}

/// Project
///
/// A portfolio entry from the `projects` table, shown on the public pages and
/// managed from the admin dashboard.
#[derive(Debug, Clone, FromRow, Default, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub project_link: Option<String>,
}

/// Message
///
/// A contact-form submission. Written by the contact handler and never read back
/// over HTTP.
#[derive(Debug, Clone, FromRow, Default, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
}

// --- Request Payloads (Form Bodies) ---

/// ProjectForm
///
/// Body of the add and edit forms. Only the store's NOT NULL constraints apply:
/// the three required fields must be present but may be empty.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub image_url: String,
    #[serde(default)]
    pub project_link: Option<String>,
}

impl ProjectForm {
    /// The link to persist, exactly as submitted. Blank input is stored as NULL.
    pub fn link(&self) -> Option<&str> {
        self.project_link
            .as_deref()
            .filter(|link| !link.trim().is_empty())
    }
}

/// LoginForm
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

/// ContactForm
///
/// Raw body of the public contact form. Missing fields deserialize as empty
/// strings so they fall through to validation instead of a 422.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// NewMessage
///
/// A contact submission that passed validation, with every field trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// ValidationError
///
/// The first rule a contact submission broke.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must be at least {} characters", MIN_NAME_CHARS)]
    NameTooShort,
    #[error("email must contain '@'")]
    EmailMissingAt,
    #[error("message must be at least {} characters", MIN_MESSAGE_CHARS)]
    MessageTooShort,
}

impl ContactForm {
    /// validate
    ///
    /// Trims every field and checks the submission rules. Lengths are counted in
    /// characters, not bytes.
    pub fn validate(&self) -> Result<NewMessage, ValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        if name.chars().count() < MIN_NAME_CHARS {
            return Err(ValidationError::NameTooShort);
        }
        if !email.contains('@') {
            return Err(ValidationError::EmailMissingAt);
        }
        if message.chars().count() < MIN_MESSAGE_CHARS {
            return Err(ValidationError::MessageTooShort);
        }

        Ok(NewMessage {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        })
    }
}

/// NewUser
///
/// Input for provisioning an admin account. `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
