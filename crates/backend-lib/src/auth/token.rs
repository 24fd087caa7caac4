// ============================
// catalog-backend-lib/src/auth/token.rs
// ============================
//! Signed bearer tokens (HS256 JWT).
//!
//! Tokens carry the username and the issue time. An `exp` claim is only
//! added, and only required, when a lifetime is configured.
use std::fmt;

use jsonwebtoken::{
    decode, encode, get_current_timestamp, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};

use super::CredentialError;

/// Payload embedded in a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// Issued at (Unix seconds)
    #[serde(default)]
    pub iat: u64,
    /// Expiry (Unix seconds), absent unless a TTL is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
}

/// Issues and verifies tokens with a single symmetric secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: Option<u64>,
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl_secs: Option<u64>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = ttl_secs.is_some();
        validation.leeway = 0;
        if ttl_secs.is_some() {
            validation.set_required_spec_claims(&["exp"]);
        }

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    /// Sign a token for `username`
    pub fn issue(&self, username: &str) -> Result<String, CredentialError> {
        let iat = get_current_timestamp();
        let claims = Claims {
            username: username.to_string(),
            iat,
            exp: self.ttl_secs.map(|ttl| iat + ttl),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CredentialError::Token(e.to_string()))
    }

    /// Check the signature (and expiry, when configured) and return the claims
    pub fn verify(&self, token: &str) -> Result<Claims, CredentialError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| CredentialError::InvalidToken(e.to_string()))
    }
}
