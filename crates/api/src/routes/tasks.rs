//! Task routes.

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
use coveted_db::entities::{
    sea_orm_active_enums::{TaskPriority, TaskStatus},
    tasks,
};
use coveted_db::repositories::task::{CreateTaskInput, UpdateTaskInput};
use coveted_db::{TaskRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the tasks router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list).post(create))
        .route("/tasks/{id}", patch(update).delete(remove))
}

/// Create payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<NaiveDate>,
    assignee_id: Option<Uuid>,
}

/// Patch payload; absent fields are left untouched.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PatchRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<NaiveDate>,
    assignee_id: Option<Uuid>,
}

/// Task response with hydrated assignee/creator.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskResponse {
    id: Uuid,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    assignee_id: Uuid,
    creator_id: Uuid,
    assignee: Option<NamedRef>,
    creator: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(
    item: tasks::Model,
    names: &std::collections::HashMap<Uuid, String>,
) -> TaskResponse {
    let named = |id: Uuid| names.get(&id).map(|name| NamedRef::new(id, name.clone()));
    TaskResponse {
        id: item.id,
        title: item.title,
        description: item.description,
        status: item.status,
        priority: item.priority,
        due_date: item.due_date,
        assignee_id: item.assignee_id,
        creator_id: item.creator_id,
        assignee: named(item.assignee_id),
        creator: named(item.creator_id),
        created_at: item.created_at,
    }
}

async fn hydrate_one(state: &AppState, item: tasks::Model) -> ApiResult<TaskResponse> {
    let users = UserRepository::new((*state.db).clone());
    let names = users.name_map(&[item.assignee_id, item.creator_id]).await?;
    Ok(to_response(item, &names))
}

/// GET /tasks - tasks the caller is assigned to or created.
async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<TaskResponse>>> {
    let repo = TaskRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let items = repo.list_for(auth.user_id()).await?;
    let mut ids: Vec<Uuid> = Vec::with_capacity(items.len() * 2);
    for t in &items {
        ids.push(t.assignee_id);
        ids.push(t.creator_id);
    }
    let names = users.name_map(&ids).await?;

    Ok(Json(
        items.into_iter().map(|t| to_response(t, &names)).collect(),
    ))
}

/// POST /tasks - create a task; unassigned tasks go to the creator.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let title = require(payload.title, "title is required")?;

    let repo = TaskRepository::new((*state.db).clone());
    let item = repo
        .create(CreateTaskInput {
            title,
            description: payload.description.unwrap_or_default(),
            priority: payload.priority.unwrap_or(TaskPriority::Medium),
            due_date: payload.due_date,
            assignee_id: payload.assignee_id.unwrap_or_else(|| auth.user_id()),
            creator_id: auth.user_id(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(hydrate_one(&state, item).await?)))
}

/// PATCH /tasks/{id}.
async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let repo = TaskRepository::new((*state.db).clone());
    let item = repo
        .update(
            id,
            UpdateTaskInput {
                title: payload.title,
                description: payload.description,
                status: payload.status,
                priority: payload.priority,
                due_date: payload.due_date,
                assignee_id: payload.assignee_id,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;

    Ok(Json(hydrate_one(&state, item).await?))
}

/// DELETE /tasks/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = TaskRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Task not found"));
    }
    Ok(Json(json!({ "ok": true })))
}
