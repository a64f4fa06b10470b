//! Password hashing and verification using Argon2id.
//!
//! Hashes are stored as PHC strings in `users.password_hash`; verification
//! is constant-time inside the argon2 verifier.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Error types for password operations
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to verify password: {0}")]
    VerificationFailed(String),

    #[error("Invalid password hash format: {0}")]
    InvalidHashFormat(String),
}

/// Hash a password using Argon2id with a random 16-byte salt.
///
/// Returns a PHC-formatted string suitable for storage.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

    Ok(password_hash.to_string())
}

/// Verify a password against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch and an error only when the stored
/// hash itself is unusable.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

    let argon2 = Argon2::default();

    match argon2.verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_produces_phc_string() {
        let hash = hash_password("MotDePasse123!").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("v=19"));
    }

    #[test]
    fn correct_password_verifies() {
        let hash = hash_password("MotDePasse123!").expect("Failed to hash password");

        assert!(verify_password("MotDePasse123!", &hash).unwrap());
    }

    #[test]
    fn wrong_password_rejected() {
        let hash = hash_password("MotDePasse123!").expect("Failed to hash password");

        assert!(!verify_password("autre-mot-de-passe", &hash).unwrap());
        assert!(!verify_password("motdepasse123!", &hash).unwrap());
    }

    #[test]
    fn invalid_hash_is_an_error() {
        let result = verify_password("whatever", "not-a-phc-string");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat(_))));
    }

    #[test]
    fn salts_differ_between_hashes() {
        let hash1 = hash_password("same-password").unwrap();
        let hash2 = hash_password("same-password").unwrap();

        assert_ne!(hash1, hash2);
        assert!(verify_password("same-password", &hash1).unwrap());
        assert!(verify_password("same-password", &hash2).unwrap());
    }
}
