// ============================
// catalog-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use zeroize::Zeroize;

use super::CredentialError;

/// Hash a password using bcrypt with a fresh random salt
pub fn hash_password(plain: &str, cost: u32) -> Result<String, CredentialError> {
    if plain.is_empty() {
        return Err(CredentialError::InvalidInput(
            "password must not be empty".to_string(),
        ));
    }
    bcrypt::hash(plain, cost).map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Verify a password against a hash
pub fn verify_password(hash: &str, plain: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "stored password hash is malformed");
            false
        },
    }
}

/// Securely hash a password and zeroize the original
pub fn hash_password_secure(plain: &mut String, cost: u32) -> Result<String, CredentialError> {
    let hash = hash_password(plain, cost);
    plain.zeroize();
    hash
}
