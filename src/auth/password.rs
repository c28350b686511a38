//! Password hashing and verification

use crate::error::{Error, Result};

/// Hash a plaintext password with bcrypt using a random salt.
///
/// The returned string embeds the algorithm parameters and salt, so it is
/// safe to persist as-is and verify later without extra bookkeeping.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost).map_err(|e| Error::Other(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a verification failure, not an error.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    bcrypt::verify(password, stored_hash).unwrap_or(false)
}
