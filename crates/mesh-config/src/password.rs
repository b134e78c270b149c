//! GUI password hashing
//!
//! Stored passwords are PHC strings, which always start with `$`. A stored
//! value that does not is taken to be cleartext.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::{Error, Result};

/// Leading character of every hashed password.
pub const HASH_SENTINEL: char = '$';

/// Whether `stored` is already in hashed form.
pub fn is_hashed(stored: &str) -> bool {
    stored.starts_with(HASH_SENTINEL)
}

/// One-way derivation of a storable credential from a cleartext password.
pub trait CredentialHasher: Send + Sync {
    /// Returns a PHC-format string starting with [`HASH_SENTINEL`].
    fn hash(&self, cleartext: &str) -> Result<String>;
}

/// Argon2id with default parameters and a random 16-byte salt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, cleartext: &str) -> Result<String> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| Error::PasswordHash {
            message: e.to_string(),
        })?;
        let hash = Argon2::default()
            .hash_password(cleartext.as_bytes(), &salt)
            .map_err(|e| Error::PasswordHash {
                message: e.to_string(),
            })?;
        Ok(hash.to_string())
    }
}

/// Check `cleartext` against a stored PHC string.
///
/// A stored value that is not a valid PHC string never verifies.
pub fn verify_password(cleartext: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(cleartext.as_bytes(), &parsed)
        .is_ok()
}
