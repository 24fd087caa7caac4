// ============================
// catalog-backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod password;
pub mod token;
mod service;
mod service_impl;

use thiserror::Error;

pub use password::{hash_password, hash_password_secure, verify_password};
pub use service::CredentialService;
pub use service_impl::BcryptJwtCredentials;
pub use token::{Claims, TokenSigner};

/// Failures of the credential service
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Token signing failed: {0}")]
    Token(String),
}
