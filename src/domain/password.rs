//! Password value object.
//!
//! Encapsulates Argon2 hashing and verification so the rest of the code never
//! touches raw password material.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Hashed password. Immutable, compared by value.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Never expose the hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Returns `invalid_request` if the password is shorter than the minimum.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::invalid_request(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?
            .to_string();

        Ok(Self { hash })
    }

    /// Wrap an existing hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Verify a plain-text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let password = Password::new("CorrectHorse9!").unwrap();
        assert!(password.verify("CorrectHorse9!"));
        assert!(!password.verify("WrongBattery0!"));
    }

    #[test]
    fn restores_from_stored_hash() {
        let password = Password::new("KeepMeSecret1").unwrap();
        let restored = Password::from_hash(password.as_str().to_string());
        assert!(restored.verify("KeepMeSecret1"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = Password::new("SamePassword123").unwrap();
        let b = Password::new("SamePassword123").unwrap();
        assert_ne!(a.as_str(), b.as_str());
    }

    #[test]
    fn rejects_short_password() {
        assert!(Password::new("short").is_err());
        assert!(Password::new("12345678").is_ok());
    }
}
