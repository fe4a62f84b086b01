//! Authentication routes.

use axum::{Json, Router, extract::State, routing::post};
use tracing::info;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use coveted_core::auth::verify_password;
use coveted_db::UserRepository;
use coveted_shared::auth::{LoginRequest, LoginResponse, UserPublic};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// POST /auth/login - Authenticate and return a bearer token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user_repo = UserRepository::new((*state.db).clone());

    let Some(user) = user_repo.find_by_email(&payload.email).await? else {
        info!(email = %payload.email, "Login attempt for non-existent user");
        return Err(ApiError::unauthorized("Invalid email or password"));
    };

    let valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    if !valid {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = state
        .jwt_service
        .generate_token(user.id, &user.email, user.role.as_str())
        .map_err(|e| ApiError::internal(e.to_string()))?;

    info!(user_id = %user.id, "User logged in successfully");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.jwt_service.token_expires_in(),
        user: UserPublic {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.as_str().to_string(),
            department: user.department,
        },
    }))
}
