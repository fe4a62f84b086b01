//! User account routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_core::auth::{hash_password, verify_password};
use coveted_db::UserRepository;
use coveted_db::entities::sea_orm_active_enums::UserRole;
use coveted_shared::auth::UserPublic;

/// Creates the user router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/user/me", get(me))
        .route("/user/all", get(list_all))
        .route("/user/password", patch(change_password))
        .route("/user/invite", post(invite))
        .route("/user/{id}", delete(remove))
}

/// Password change payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest {
    current_password: Option<String>,
    new_password: Option<String>,
}

/// Invite payload.
#[derive(Debug, Deserialize)]
struct InviteRequest {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<UserRole>,
    department: Option<String>,
}

fn to_public(user: coveted_db::entities::users::Model) -> UserPublic {
    UserPublic {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role.as_str().to_string(),
        department: user.department,
    }
}

/// GET /user/me - the authenticated user's profile.
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserPublic>> {
    let user_repo = UserRepository::new((*state.db).clone());
    let user = user_repo
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(to_public(user)))
}

/// GET /user/all - every account, for pickers and reports.
async fn list_all(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<Vec<UserPublic>>> {
    let user_repo = UserRepository::new((*state.db).clone());
    let users = user_repo.list().await?;
    Ok(Json(users.into_iter().map(to_public).collect()))
}

/// PATCH /user/password - change own password.
async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let current = require(
        payload.current_password,
        "currentPassword and newPassword are required",
    )?;
    let new = require(
        payload.new_password,
        "currentPassword and newPassword are required",
    )?;
    if new.len() < 6 {
        return Err(ApiError::validation(
            "New password must be at least 6 characters",
        ));
    }

    let user_repo = UserRepository::new((*state.db).clone());
    let user = user_repo
        .find_by_id(auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let valid = verify_password(&current, &user.password_hash)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !valid {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    let hashed = hash_password(&new).map_err(|e| ApiError::internal(e.to_string()))?;
    user_repo.update_password(auth.user_id(), &hashed).await?;

    Ok(Json(json!({ "message": "Password updated successfully" })))
}

/// POST /user/invite - admin/manager creates a new account.
async fn invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<InviteRequest>,
) -> ApiResult<(StatusCode, Json<UserPublic>)> {
    if !auth.is_privileged() {
        return Err(ApiError::forbidden(
            "Only admins and managers can invite users",
        ));
    }
    let name = require(payload.name, "name, email, and password are required")?;
    let email = require(payload.email, "name, email, and password are required")?;
    let password = require(payload.password, "name, email, and password are required")?;

    let user_repo = UserRepository::new((*state.db).clone());
    if user_repo.email_exists(&email).await? {
        return Err(ApiError::conflict("Email already registered"));
    }

    let hashed = hash_password(&password).map_err(|e| ApiError::internal(e.to_string()))?;
    let user = user_repo
        .create(
            &name,
            &email,
            &hashed,
            payload.role.unwrap_or(UserRole::Employee),
            payload.department.as_deref().unwrap_or(""),
        )
        .await?;

    info!(user_id = %user.id, invited_by = %auth.user_id(), "User invited");

    Ok((StatusCode::CREATED, Json(to_public(user))))
}

/// DELETE /user/{id} - admin removes an account.
async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    if auth.role() != "admin" {
        return Err(ApiError::forbidden("Only admins can remove users"));
    }
    if id == auth.user_id() {
        return Err(ApiError::validation("You cannot delete your own account"));
    }

    let user_repo = UserRepository::new((*state.db).clone());
    if !user_repo.delete(id).await? {
        return Err(ApiError::not_found("User not found"));
    }

    info!(user_id = %id, removed_by = %auth.user_id(), "User removed");
    Ok(Json(json!({ "message": "User removed" })))
}
