//! Password hashing and verification utilities
//!
//! Argon2id with a random salt per hash. Hashing is CPU-bound, so the async
//! entry points on [`PasswordService`] run it on the blocking pool.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::AppError;

/// Inclusive bounds on password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Check a password against a stored hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Async facade over the hashing functions
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    pub async fn hash(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(AppError::internal)?
    }

    /// Fails with `InvalidCredentials` on mismatch
    pub async fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(AppError::internal)??;

        if matches {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Check password length and composition.
///
/// A password must be 8-128 characters and contain at least one letter and
/// one digit. All unmet requirements are reported together.
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    let mut problems = Vec::new();

    if len < MIN_PASSWORD_LENGTH {
        problems.push(format!("be at least {MIN_PASSWORD_LENGTH} characters long"));
    }
    if len > MAX_PASSWORD_LENGTH {
        problems.push(format!("be at most {MAX_PASSWORD_LENGTH} characters long"));
    }
    if !password.chars().any(char::is_alphabetic) {
        problems.push("contain a letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("contain a digit".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Password must {}",
            problems.join(" and ")
        )))
    }
}
