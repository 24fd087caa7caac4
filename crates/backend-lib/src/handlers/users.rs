// ============================
// crates/backend-lib/src/handlers/users.rs
// ============================
//! Registration and login.
use std::sync::Arc;

use ::metrics::counter;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use catalog_common::{Credentials, MessageResponse, TokenResponse};
use zeroize::Zeroize;

use crate::storage::User;
use crate::validation::{self, ValidationError};
use crate::{error::AppError, metrics, AppState};

pub const REGISTERED_MESSAGE: &str = "User registered successfully";

/// `POST /register`
///
/// Stores the bcrypt hash of the password, never the password itself.
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(body) = payload?;
    let (username, mut password) = validation::validate_credentials(body)?;

    let existing = state
        .users
        .find_one(&|u: &User| u.username == username)
        .await?;
    if existing.is_some() {
        password.zeroize();
        return Err(ValidationError::Duplicate("username", username).into());
    }

    let hashed = state.credentials.hash_password(&password).await;
    password.zeroize();
    let user = state.users.save(User::new(username, hashed?)).await?;

    tracing::info!(username = %user.username, "user registered");
    counter!(metrics::USER_REGISTERED).increment(1);

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: REGISTERED_MESSAGE.to_string(),
        }),
    ))
}

/// `POST /login`
///
/// Unknown usernames and wrong passwords are both 401, with distinct messages.
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(body) = payload?;
    let (username, mut password) = validation::validate_credentials(body)?;

    let found = state
        .users
        .find_one(&|u: &User| u.username == username)
        .await?;
    let Some(user) = found else {
        password.zeroize();
        tracing::warn!(%username, "login for unknown user");
        counter!(metrics::LOGIN_FAILURE, "reason" => "unknown_user").increment(1);
        return Err(AppError::UserNotFound);
    };

    let verified = state
        .credentials
        .verify_password(&password, &user.password)
        .await;
    password.zeroize();
    if !verified {
        tracing::warn!(%username, "login with wrong password");
        counter!(metrics::LOGIN_FAILURE, "reason" => "bad_password").increment(1);
        return Err(AppError::AuthFailed);
    }

    let token = state.credentials.issue_token(&user.username)?;
    tracing::info!(%username, "user logged in");
    counter!(metrics::LOGIN_SUCCESS).increment(1);

    Ok(Json(TokenResponse { token }))
}
