//! Argon2id password hashing behind the [`CredentialHasher`] seam.
//!
//! Digests are PHC strings, so the algorithm parameters and salt travel with the
//! hash and a stored digest can be verified without any other context.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::sync::Arc;

use crate::error::{AppError, AppResult};

/// The two operations the auth gate needs from a password scheme.
pub trait CredentialHasher: Send + Sync {
    /// Hash `plain` with a fresh random salt.
    fn hash(&self, plain: &str) -> Result<String, argon2::password_hash::Error>;

    /// `true` only if `plain` matches `digest`. A malformed digest is a mismatch.
    fn verify(&self, plain: &str, digest: &str) -> bool;
}

pub type HasherState = Arc<dyn CredentialHasher>;

/// Argon2id with the crate's default parameters.
#[derive(Clone, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, plain: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(plain.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    fn verify(&self, plain: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("stored password digest is not a PHC string: {}", e);
                return false;
            }
        };
        Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok()
    }
}

// --- Async entry points ---
// Argon2 work never runs on a runtime worker thread.

/// Hashes `plain` on the blocking pool.
pub async fn hash_blocking(hasher: &HasherState, plain: &str) -> AppResult<String> {
    let hasher = Arc::clone(hasher);
    let plain = plain.to_owned();
    let digest = tokio::task::spawn_blocking(move || hasher.hash(&plain))
        .await
        .map_err(|e| AppError::PasswordHash(format!("hashing task failed: {e}")))??;
    Ok(digest)
}

/// Verifies `plain` against `digest` on the blocking pool.
pub async fn verify_blocking(hasher: &HasherState, plain: &str, digest: &str) -> AppResult<bool> {
    let hasher = Arc::clone(hasher);
    let plain = plain.to_owned();
    let digest = digest.to_owned();
    tokio::task::spawn_blocking(move || hasher.verify(&plain, &digest))
        .await
        .map_err(|e| AppError::PasswordHash(format!("verification task failed: {e}")))
}
