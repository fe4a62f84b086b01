//! Operations routes: SOP library and the day-to-day schedule.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::entities::{schedule_events, sops};
use coveted_db::repositories::operations::{
    CreateEventInput, CreateSopInput, UpdateEventInput, UpdateSopInput,
};
use coveted_db::{OperationsRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the operations router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/operations/sops", get(list_sops).post(create_sop))
        .route("/operations/sops/{id}", patch(update_sop).delete(remove_sop))
        .route("/operations/schedule", get(list_events).post(create_event))
        .route(
            "/operations/schedule/{id}",
            patch(update_event).delete(remove_event),
        )
}

// ============================================================================
// SOPs
// ============================================================================

/// SOP create payload.
#[derive(Debug, Deserialize)]
struct SopRequest {
    title: Option<String>,
    category: Option<String>,
    content: Option<String>,
}

/// SOP patch payload.
#[derive(Debug, Deserialize, Default)]
struct SopPatchRequest {
    title: Option<String>,
    category: Option<String>,
    content: Option<String>,
}

/// GET /operations/sops.
async fn list_sops(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<sops::Model>>> {
    let repo = OperationsRepository::new((*state.db).clone());
    Ok(Json(repo.list_sops().await?))
}

/// POST /operations/sops.
async fn create_sop(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<SopRequest>,
) -> ApiResult<(StatusCode, Json<sops::Model>)> {
    let title = require(payload.title, "Title and content are required")?;
    let content = require(payload.content, "Title and content are required")?;

    let repo = OperationsRepository::new((*state.db).clone());
    let sop = repo
        .create_sop(CreateSopInput {
            title,
            category: payload.category.unwrap_or_else(|| "general".to_string()),
            content,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(sop)))
}

/// PATCH /operations/sops/{id}.
async fn update_sop(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SopPatchRequest>,
) -> ApiResult<Json<sops::Model>> {
    let repo = OperationsRepository::new((*state.db).clone());
    let sop = repo
        .update_sop(
            id,
            UpdateSopInput {
                title: payload.title,
                category: payload.category,
                content: payload.content,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("SOP not found"))?;
    Ok(Json(sop))
}

/// DELETE /operations/sops/{id}.
async fn remove_sop(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = OperationsRepository::new((*state.db).clone());
    if !repo.delete_sop(id).await? {
        return Err(ApiError::not_found("SOP not found"));
    }
    Ok(Json(json!({ "success": true })))
}

// ============================================================================
// Schedule events
// ============================================================================

/// Event create payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRequest {
    title: Option<String>,
    date: Option<NaiveDate>,
    start_time: Option<String>,
    end_time: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    assignee_id: Option<Uuid>,
    notes: Option<String>,
}

/// Event patch payload.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct EventPatchRequest {
    title: Option<String>,
    date: Option<NaiveDate>,
    start_time: Option<String>,
    end_time: Option<String>,
    #[serde(rename = "type")]
    event_type: Option<String>,
    assignee_id: Option<Uuid>,
    notes: Option<String>,
    done: Option<bool>,
}

/// Event response with hydrated assignee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventResponse {
    #[serde(flatten)]
    event: schedule_events::Model,
    assignee: Option<NamedRef>,
}

async fn hydrate(
    state: &AppState,
    items: Vec<schedule_events::Model>,
) -> ApiResult<Vec<EventResponse>> {
    let users = UserRepository::new((*state.db).clone());
    let ids: Vec<Uuid> = items.iter().filter_map(|e| e.assignee_id).collect();
    let names = users.name_map(&ids).await?;
    Ok(items
        .into_iter()
        .map(|event| {
            let assignee = event
                .assignee_id
                .and_then(|id| names.get(&id).map(|n| NamedRef::new(id, n.clone())));
            EventResponse { event, assignee }
        })
        .collect())
}

/// GET /operations/schedule - events by date then start time.
async fn list_events(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let repo = OperationsRepository::new((*state.db).clone());
    let items = repo.list_events().await?;
    Ok(Json(hydrate(&state, items).await?))
}

/// POST /operations/schedule.
async fn create_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<EventRequest>,
) -> ApiResult<(StatusCode, Json<EventResponse>)> {
    let title = require(payload.title, "Title and date are required")?;
    let date = payload
        .date
        .ok_or_else(|| ApiError::validation("Title and date are required"))?;

    let repo = OperationsRepository::new((*state.db).clone());
    let item = repo
        .create_event(CreateEventInput {
            title,
            date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            event_type: payload.event_type.unwrap_or_else(|| "task".to_string()),
            assignee_id: payload.assignee_id,
            notes: payload.notes.unwrap_or_default(),
        })
        .await?;

    let mut hydrated = hydrate(&state, vec![item]).await?;
    let response = hydrated
        .pop()
        .ok_or_else(|| ApiError::internal("hydration returned no rows"))?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PATCH /operations/schedule/{id}.
async fn update_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<EventPatchRequest>,
) -> ApiResult<Json<EventResponse>> {
    let repo = OperationsRepository::new((*state.db).clone());
    let item = repo
        .update_event(
            id,
            UpdateEventInput {
                title: payload.title,
                date: payload.date,
                start_time: payload.start_time.map(Some),
                end_time: payload.end_time.map(Some),
                event_type: payload.event_type,
                assignee_id: payload.assignee_id.map(Some),
                notes: payload.notes,
                done: payload.done,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Schedule event not found"))?;

    let mut hydrated = hydrate(&state, vec![item]).await?;
    let response = hydrated
        .pop()
        .ok_or_else(|| ApiError::internal("hydration returned no rows"))?;
    Ok(Json(response))
}

/// DELETE /operations/schedule/{id}.
async fn remove_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = OperationsRepository::new((*state.db).clone());
    if !repo.delete_event(id).await? {
        return Err(ApiError::not_found("Schedule event not found"));
    }
    Ok(Json(json!({ "success": true })))
}
