// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog_common::ErrorBody;
use thiserror::Error;

use crate::auth::CredentialError;
use crate::storage::StorageError;
use crate::validation::ValidationError;

/// Message returned for every unexpected failure
pub const INTERNAL_MESSAGE: &str = "Internal Server Error";

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or duplicate fields, malformed ids or bodies
    #[error("{0}")]
    Validation(String),

    /// Protected endpoint called without an `Authorization` header
    #[error("Authorization header missing")]
    AuthMissing,

    /// `Authorization` header present but the token does not verify
    #[error("Invalid token")]
    AuthInvalid,

    /// Login with a wrong password
    #[error("Authentication failed")]
    AuthFailed,

    /// Login with an unknown username
    #[error("User not found")]
    UserNotFound,

    #[error("{0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AuthMissing | AppError::AuthFailed | AppError::UserNotFound => {
                StatusCode::UNAUTHORIZED
            },
            AppError::AuthInvalid => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VAL_001",
            AppError::AuthMissing => "AUTH_001",
            AppError::AuthInvalid => "AUTH_002",
            AppError::AuthFailed => "AUTH_003",
            AppError::UserNotFound => "AUTH_004",
            AppError::NotFound(_) => "NF_001",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Message placed in the `{error}` body. Internal details stay in the logs.
    pub fn client_message(&self) -> String {
        match self {
            AppError::Internal(_) => INTERNAL_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// Auth gate rejections carry no body
    fn is_bare(&self) -> bool {
        matches!(self, AppError::AuthMissing | AppError::AuthInvalid)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        match &self {
            AppError::Internal(detail) => {
                tracing::error!(code, %detail, "request failed");
            },
            other => {
                tracing::debug!(code, status = status.as_u16(), error = %other, "request rejected");
            },
        }

        if self.is_bare() {
            return status.into_response();
        }

        let body = ErrorBody {
            error: self.client_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate { .. } => AppError::Validation(err.to_string()),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::InvalidInput(_) => AppError::Validation(err.to_string()),
            CredentialError::InvalidToken(_) => AppError::AuthInvalid,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
