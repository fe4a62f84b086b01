//! Performance goal routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::entities::performance_goals;
use coveted_db::repositories::performance_goal::{CreateGoalInput, UpdateGoalInput};
use coveted_db::{PerformanceGoalRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the performance router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/performance", get(list).post(create))
        .route("/performance/{id}", patch(update).delete(remove))
}

/// Create payload. Employees may only set goals for themselves; an
/// admin/manager may pass `userId` to set one for someone else.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    target_date: Option<NaiveDate>,
    user_id: Option<Uuid>,
}

/// Patch payload.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PatchRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    status: Option<String>,
    progress: Option<i32>,
    target_date: Option<NaiveDate>,
}

/// Goal response with hydrated owner.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GoalResponse {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    category: String,
    status: String,
    progress: i32,
    target_date: Option<NaiveDate>,
    user: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(
    item: performance_goals::Model,
    names: &std::collections::HashMap<Uuid, String>,
) -> GoalResponse {
    GoalResponse {
        id: item.id,
        user_id: item.user_id,
        title: item.title,
        description: item.description,
        category: item.category,
        status: item.status,
        progress: item.progress,
        target_date: item.target_date,
        user: names
            .get(&item.user_id)
            .map(|n| NamedRef::new(item.user_id, n.clone())),
        created_at: item.created_at,
    }
}

async fn hydrate_one(state: &AppState, item: performance_goals::Model) -> ApiResult<GoalResponse> {
    let users = UserRepository::new((*state.db).clone());
    let names = users.name_map(&[item.user_id]).await?;
    Ok(to_response(item, &names))
}

/// GET /performance - own goals, or everyone's for admin/manager.
async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<GoalResponse>>> {
    let repo = PerformanceGoalRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let items = repo.list(auth.scope()).await?;
    let ids: Vec<Uuid> = items.iter().map(|g| g.user_id).collect();
    let names = users.name_map(&ids).await?;

    Ok(Json(
        items.into_iter().map(|g| to_response(g, &names)).collect(),
    ))
}

/// POST /performance.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<GoalResponse>)> {
    let title = require(payload.title, "title is required")?;

    let owner_id = match payload.user_id {
        Some(user_id) if auth.is_privileged() => user_id,
        _ => auth.user_id(),
    };

    let repo = PerformanceGoalRepository::new((*state.db).clone());
    let item = repo
        .create(CreateGoalInput {
            user_id: owner_id,
            title,
            description: payload.description.unwrap_or_default(),
            category: payload.category.unwrap_or_else(|| "work".to_string()),
            target_date: payload.target_date,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(hydrate_one(&state, item).await?)))
}

/// PATCH /performance/{id}.
async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchRequest>,
) -> ApiResult<Json<GoalResponse>> {
    let repo = PerformanceGoalRepository::new((*state.db).clone());
    let item = repo
        .update(
            id,
            UpdateGoalInput {
                title: payload.title,
                description: payload.description,
                category: payload.category,
                status: payload.status,
                progress: payload.progress,
                target_date: payload.target_date,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Goal not found"))?;

    Ok(Json(hydrate_one(&state, item).await?))
}

/// DELETE /performance/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = PerformanceGoalRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Goal not found"));
    }
    Ok(Json(json!({ "ok": true })))
}
