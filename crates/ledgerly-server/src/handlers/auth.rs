//! Authentication-related handlers

use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::read_json;
use crate::auth::{hash_password, issue_token, verify_password};
use crate::{current_user, AppError, AppState};
use ledgerly_core::models::{NewUser, Profile, Registration};

/// Request body for logging in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Issued access token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// POST /api/auth/register - Create a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Profile>), AppError> {
    let form: Registration = read_json(request).await?;
    form.validate()?;

    let password_hash = hash_password(&form.password)?;
    let user = state
        .ledger
        .create_user(&NewUser {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            age: form.age,
            email: form.normalized_email(),
            password_hash,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Profile::from(user))))
}

/// POST /api/auth/login - Exchange credentials for an access token
pub async fn login(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<TokenResponse>, AppError> {
    let req: LoginRequest = read_json(request).await?;

    // Unknown email and wrong password look the same to the caller
    let user = match state.ledger.find_user_by_email(&req.email).await? {
        Some(user) if verify_password(&req.password, &user.password_hash) => user,
        _ => {
            warn!("Failed login attempt");
            return Err(AppError::unauthorized("Invalid credentials"));
        }
    };

    let access_token = issue_token(&state.config.jwt, &user.id, &user.email)?;
    info!(user_id = %user.id, "User logged in");

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
        expires_in: state.config.jwt.ttl_minutes * 60,
    }))
}

/// GET /api/auth/me - Get the currently authenticated user
pub async fn get_me(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Profile>, AppError> {
    let caller = current_user(&request)?;
    let user = state
        .ledger
        .get_user(&caller.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Json(Profile::from(user)))
}
