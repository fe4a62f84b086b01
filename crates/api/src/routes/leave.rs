//! Leave request routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::entities::{leave_requests, sea_orm_active_enums::LeaveStatus};
use coveted_db::{LeaveRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the leave router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leave", get(list).post(create))
        .route("/leave/{id}", patch(review))
}

/// File-request payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    #[serde(rename = "type")]
    leave_type: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    reason: Option<String>,
}

/// Review payload; status must be approved or denied.
#[derive(Debug, Deserialize)]
struct ReviewRequest {
    status: Option<String>,
}

/// Leave response with hydrated user and reviewer.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaveResponse {
    id: Uuid,
    user_id: Uuid,
    #[serde(rename = "type")]
    leave_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    reason: String,
    status: LeaveStatus,
    reviewer_id: Option<Uuid>,
    user: Option<NamedRef>,
    reviewer: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(
    item: leave_requests::Model,
    names: &std::collections::HashMap<Uuid, String>,
) -> LeaveResponse {
    let named = |id: Uuid| names.get(&id).map(|name| NamedRef::new(id, name.clone()));
    LeaveResponse {
        id: item.id,
        user_id: item.user_id,
        leave_type: item.leave_type,
        start_date: item.start_date,
        end_date: item.end_date,
        reason: item.reason,
        status: item.status,
        reviewer_id: item.reviewer_id,
        user: named(item.user_id),
        reviewer: item.reviewer_id.and_then(named),
        created_at: item.created_at,
    }
}

async fn hydrate(
    state: &AppState,
    items: Vec<leave_requests::Model>,
) -> ApiResult<Vec<LeaveResponse>> {
    let users = UserRepository::new((*state.db).clone());
    let mut ids: Vec<Uuid> = items.iter().map(|l| l.user_id).collect();
    ids.extend(items.iter().filter_map(|l| l.reviewer_id));
    let names = users.name_map(&ids).await?;
    Ok(items.into_iter().map(|l| to_response(l, &names)).collect())
}

async fn hydrate_one(state: &AppState, item: leave_requests::Model) -> ApiResult<LeaveResponse> {
    let users = UserRepository::new((*state.db).clone());
    let mut ids = vec![item.user_id];
    ids.extend(item.reviewer_id);
    let names = users.name_map(&ids).await?;
    Ok(to_response(item, &names))
}

/// GET /leave - own requests, or everyone's for admin/manager.
async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<LeaveResponse>>> {
    let repo = LeaveRepository::new((*state.db).clone());
    let items = repo.list(auth.scope()).await?;
    Ok(Json(hydrate(&state, items).await?))
}

/// POST /leave - file a request.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<LeaveResponse>)> {
    let leave_type = require(payload.leave_type, "type, startDate, and endDate are required")?;
    let start_date = payload
        .start_date
        .ok_or_else(|| ApiError::validation("type, startDate, and endDate are required"))?;
    let end_date = payload
        .end_date
        .ok_or_else(|| ApiError::validation("type, startDate, and endDate are required"))?;

    let repo = LeaveRepository::new((*state.db).clone());
    let item = repo
        .create(
            auth.user_id(),
            &leave_type,
            start_date,
            end_date,
            payload.reason.as_deref().unwrap_or(""),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(hydrate_one(&state, item).await?)))
}

/// PATCH /leave/{id} - approve or deny.
async fn review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReviewRequest>,
) -> ApiResult<Json<LeaveResponse>> {
    let status = match payload.status.as_deref() {
        Some("approved") => LeaveStatus::Approved,
        Some("denied") => LeaveStatus::Denied,
        _ => return Err(ApiError::validation("status must be approved or denied")),
    };

    let repo = LeaveRepository::new((*state.db).clone());
    let item = repo
        .review(id, status, auth.user_id())
        .await?
        .ok_or_else(|| ApiError::not_found("Leave request not found"))?;

    Ok(Json(hydrate_one(&state, item).await?))
}
