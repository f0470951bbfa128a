//! Password hashing for account rows
//!
//! Account tables store Argon2id PHC strings, never plaintext.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::errors::LeaseUpError;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// Check a candidate password against the length policy
pub fn validate_password(password: &str) -> Result<(), LeaseUpError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(LeaseUpError::PasswordTooShort {
            min_len: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Hash a password into an Argon2id PHC string with a random salt
///
/// The password is validated first, so a too-short password never reaches
/// the hasher.
pub fn hash_password(password: &str) -> Result<String, LeaseUpError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| LeaseUpError::Credential {
            reason: format!("hashing failed: {}", e),
        })
}

/// Verify a plaintext password against a stored PHC string
///
/// Returns `Ok(false)` on mismatch and an error only when the stored hash is
/// malformed.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, LeaseUpError> {
    let parsed = PasswordHash::new(hash).map_err(|e| LeaseUpError::Credential {
        reason: format!("invalid hash format: {}", e),
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(LeaseUpError::Credential {
            reason: format!("verify error: {}", e),
        }),
    }
}
