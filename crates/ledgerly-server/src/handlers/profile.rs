//! Profile handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};

use super::read_json;
use crate::auth::hash_password;
use crate::{current_user, AppError, AppState};
use ledgerly_core::models::{Profile, ProfileUpdate, UserPatch};

/// GET /api/profile - Get the caller's profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Profile>, AppError> {
    let caller = current_user(&request)?;
    let user = state
        .ledger
        .get_user(&caller.id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;
    Ok(Json(user.into()))
}

/// PATCH /api/profile - Update name, age, or password
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<Profile>, AppError> {
    let caller = current_user(&request)?;
    let update: ProfileUpdate = read_json(request).await?;
    update.validate()?;

    let password_hash = update
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let patch = UserPatch {
        first_name: update.first_name.map(|s| s.trim().to_string()),
        last_name: update.last_name.map(|s| s.trim().to_string()),
        age: update.age,
        password_hash,
    };

    let user = state
        .ledger
        .update_user(&caller.id, &patch)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;
    Ok(Json(user.into()))
}
