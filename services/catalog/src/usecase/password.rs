use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngExt;
use std::sync::LazyLock;

use crate::error::CatalogError;

const SALT_LEN: usize = 16;

static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("catcollector-unknown-user").ok());

/// A hash with the default parameters, verified against when no account
/// matches so unknown usernames cost the same as wrong passwords.
pub fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH.as_deref()
}

/// Hash a password into an argon2 PHC string with a random salt.
pub fn hash_password(password: &str) -> Result<String, CatalogError> {
    let mut rng = rand::rng();
    let bytes: [u8; SALT_LEN] = std::array::from_fn(|_| rng.random_range(0..=u8::MAX));
    let salt = SaltString::encode_b64(&bytes)
        .map_err(|e| anyhow::anyhow!("encode password salt: {e}"))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Check a password against a stored PHC string. Unparseable hashes never match.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("stored password hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
