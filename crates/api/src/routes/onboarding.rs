//! Onboarding checklist routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::entities::onboarding_steps;
use coveted_db::repositories::onboarding::{CreateStepInput, UpdateStepInput};
use coveted_db::{OnboardingRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the onboarding router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/onboarding", get(list).post(create))
        .route("/onboarding/{id}", patch(update).delete(remove))
}

/// Create payload. Employees may only add steps for themselves; an
/// admin/manager may pass `assigneeId` to assign someone else.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    sort_order: Option<i32>,
    assignee_id: Option<Uuid>,
}

/// Patch payload.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PatchRequest {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    done: Option<bool>,
    sort_order: Option<i32>,
}

/// Step response with hydrated assignee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StepResponse {
    id: Uuid,
    assignee_id: Uuid,
    title: String,
    description: String,
    category: String,
    done: bool,
    sort_order: i32,
    assignee: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(
    item: onboarding_steps::Model,
    names: &std::collections::HashMap<Uuid, String>,
) -> StepResponse {
    StepResponse {
        id: item.id,
        assignee_id: item.assignee_id,
        title: item.title,
        description: item.description,
        category: item.category,
        done: item.done,
        sort_order: item.sort_order,
        assignee: names
            .get(&item.assignee_id)
            .map(|n| NamedRef::new(item.assignee_id, n.clone())),
        created_at: item.created_at,
    }
}

async fn hydrate_one(state: &AppState, item: onboarding_steps::Model) -> ApiResult<StepResponse> {
    let users = UserRepository::new((*state.db).clone());
    let names = users.name_map(&[item.assignee_id]).await?;
    Ok(to_response(item, &names))
}

/// GET /onboarding - own steps, or everyone's for admin/manager.
async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<StepResponse>>> {
    let repo = OnboardingRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let items = repo.list(auth.scope()).await?;
    let ids: Vec<Uuid> = items.iter().map(|s| s.assignee_id).collect();
    let names = users.name_map(&ids).await?;

    Ok(Json(
        items.into_iter().map(|s| to_response(s, &names)).collect(),
    ))
}

/// POST /onboarding.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<StepResponse>)> {
    let title = require(payload.title, "title is required")?;

    let assignee_id = match payload.assignee_id {
        Some(user_id) if auth.is_privileged() => user_id,
        _ => auth.user_id(),
    };

    let repo = OnboardingRepository::new((*state.db).clone());
    let item = repo
        .create(CreateStepInput {
            assignee_id,
            title,
            description: payload.description.unwrap_or_default(),
            category: payload.category.unwrap_or_else(|| "general".to_string()),
            sort_order: payload.sort_order.unwrap_or(0),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(hydrate_one(&state, item).await?)))
}

/// PATCH /onboarding/{id}.
async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchRequest>,
) -> ApiResult<Json<StepResponse>> {
    let repo = OnboardingRepository::new((*state.db).clone());
    let item = repo
        .update(
            id,
            UpdateStepInput {
                title: payload.title,
                description: payload.description,
                category: payload.category,
                done: payload.done,
                sort_order: payload.sort_order,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Onboarding step not found"))?;

    Ok(Json(hydrate_one(&state, item).await?))
}

/// DELETE /onboarding/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = OnboardingRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Onboarding step not found"));
    }
    Ok(Json(json!({ "ok": true })))
}
