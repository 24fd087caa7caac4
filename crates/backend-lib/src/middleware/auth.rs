// ============================
// crates/backend-lib/src/middleware/auth.rs
// ============================
//! Token gate for protected routes.
//!
//! The `Authorization` header carries the raw token (no `Bearer ` scheme).
//! No header is a 401, a header that does not verify is a 403; both answer
//! with an empty body. On success the decoded [`Claims`] are inserted into
//! the request extensions.
use std::sync::Arc;

use ::metrics::counter;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{Claims, CredentialError};
use crate::{error::AppError, metrics, AppState};

/// Outcome of inspecting the `Authorization` header
#[derive(Debug)]
pub enum TokenCheck {
    NoToken,
    InvalidToken(CredentialError),
    Valid(Claims),
}

impl TokenCheck {
    pub fn inspect(state: &AppState, request: &Request) -> Self {
        let Some(header) = request.headers().get(AUTHORIZATION) else {
            return TokenCheck::NoToken;
        };
        let verified = header
            .to_str()
            .map_err(|_| CredentialError::InvalidToken("header is not visible ASCII".to_string()))
            .and_then(|token| state.credentials.verify_token(token));
        match verified {
            Ok(claims) => TokenCheck::Valid(claims),
            Err(e) => TokenCheck::InvalidToken(e),
        }
    }
}

/// Reject requests that do not carry a valid token
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    match TokenCheck::inspect(&state, &request) {
        TokenCheck::NoToken => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                "missing token"
            );
            counter!(metrics::AUTH_REJECTED, "reason" => "missing").increment(1);
            Err(AppError::AuthMissing)
        },
        TokenCheck::InvalidToken(e) => {
            tracing::warn!(
                method = %request.method(),
                path = %request.uri().path(),
                error = %e,
                "invalid token"
            );
            counter!(metrics::AUTH_REJECTED, "reason" => "invalid").increment(1);
            Err(AppError::AuthInvalid)
        },
        TokenCheck::Valid(claims) => {
            tracing::debug!(username = %claims.username, "token accepted");
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        },
    }
}
