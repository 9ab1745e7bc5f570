use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{UserFields, UserRecord};
use crate::store::RecordStore;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct UserActionResponse {
    pub success: bool,
}

/// List every stored user, oldest first
///
/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserRecord>>> {
    let records = state.store.fetch_all().await?;
    Ok(Json(records))
}

/// Fetch a single user
///
/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserRecord>> {
    let record = state.store.get(&id).await?.ok_or(AppError::RecordNotFound)?;
    Ok(Json(record))
}

/// Register a new user
///
/// No format or uniqueness check is made on either field, so submitting the
/// same values twice stores two records.
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserFields>,
) -> Result<(StatusCode, Json<CreateUserResponse>)> {
    let id = state.store.add(payload).await?;
    Ok((StatusCode::CREATED, Json(CreateUserResponse { id })))
}

/// Overwrite both fields of an existing user
///
/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UserFields>,
) -> Result<Json<UserActionResponse>> {
    state.store.update(&id, payload).await?;
    Ok(Json(UserActionResponse { success: true }))
}

/// Remove a user; unknown ids succeed as well
///
/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserActionResponse>> {
    state.store.delete(&id).await?;
    Ok(Json(UserActionResponse { success: true }))
}
