use async_trait::async_trait;
use tokio::task;

use super::{password, Claims, CredentialError, CredentialService, TokenSigner};
use crate::config::AuthSettings;

/// bcrypt passwords + HS256 tokens
#[derive(Debug, Clone)]
pub struct BcryptJwtCredentials {
    cost: u32,
    signer: TokenSigner,
}

impl BcryptJwtCredentials {
    pub fn new(cost: u32, signer: TokenSigner) -> Self {
        Self { cost, signer }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.hash_cost,
            TokenSigner::new(settings.token_secret.as_bytes(), settings.token_ttl_secs),
        )
    }
}

#[async_trait]
impl CredentialService for BcryptJwtCredentials {
    async fn hash_password(&self, plain: &str) -> Result<String, CredentialError> {
        let mut plain = plain.to_string();
        let cost = self.cost;
        task::spawn_blocking(move || password::hash_password_secure(&mut plain, cost))
            .await
            .map_err(|e| CredentialError::Hash(e.to_string()))?
    }

    async fn verify_password(&self, plain: &str, hash: &str) -> bool {
        let plain = plain.to_string();
        let hash = hash.to_string();
        match task::spawn_blocking(move || password::verify_password(&hash, &plain)).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(error = %e, "password verification task failed");
                false
            },
        }
    }

    fn issue_token(&self, username: &str) -> Result<String, CredentialError> {
        self.signer.issue(username)
    }

    fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        self.signer.verify(token)
    }
}
