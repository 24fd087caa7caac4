// =============
// crates/backend-lib/src/auth/service.rs
// =============
//! This module defines the `CredentialService` trait used by the handlers and the auth gate
use async_trait::async_trait;

use super::{Claims, CredentialError};

#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Salted one-way hash for storage
    async fn hash_password(&self, plain: &str) -> Result<String, CredentialError>;
    /// `false` on mismatch or on a malformed stored hash
    async fn verify_password(&self, plain: &str, hash: &str) -> bool;
    fn issue_token(&self, username: &str) -> Result<String, CredentialError>;
    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError>;
}
