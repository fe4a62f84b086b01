//! Meeting routes.

use std::collections::HashMap;

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
use coveted_db::entities::{meetings, users};
use coveted_db::repositories::meeting::{CreateMeetingInput, UpdateMeetingInput, attendee_ids};
use coveted_db::{MeetingRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the meetings router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/meetings", get(list).post(create))
        .route("/meetings/{id}", patch(update).delete(remove))
}

/// Create payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    title: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
    video_link: Option<String>,
    notes: Option<String>,
    attendee_ids: Option<Vec<Uuid>>,
}

/// Patch payload.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PatchRequest {
    title: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
    video_link: Option<String>,
    notes: Option<String>,
    attendee_ids: Option<Vec<Uuid>>,
}

/// Attendee info in responses.
#[derive(Debug, Serialize)]
struct AttendeeRef {
    id: Uuid,
    name: String,
    email: String,
}

/// Meeting response with hydrated creator and attendees.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeetingResponse {
    id: Uuid,
    title: String,
    date: NaiveDate,
    time: Option<String>,
    video_link: String,
    notes: String,
    attendee_ids: Vec<Uuid>,
    attendees: Vec<AttendeeRef>,
    created_by_id: Uuid,
    created_by: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(item: meetings::Model, users_by_id: &HashMap<Uuid, users::Model>) -> MeetingResponse {
    let ids = attendee_ids(&item);
    // Attendee ids referencing deleted users are silently dropped.
    let attendees = ids
        .iter()
        .filter_map(|id| {
            users_by_id.get(id).map(|u| AttendeeRef {
                id: u.id,
                name: u.name.clone(),
                email: u.email.clone(),
            })
        })
        .collect();
    MeetingResponse {
        id: item.id,
        title: item.title,
        date: item.date,
        time: item.time,
        video_link: item.video_link,
        notes: item.notes,
        attendee_ids: ids,
        attendees,
        created_by: users_by_id
            .get(&item.created_by_id)
            .map(|u| NamedRef::new(u.id, u.name.clone())),
        created_by_id: item.created_by_id,
        created_at: item.created_at,
    }
}

async fn user_index(state: &AppState) -> ApiResult<HashMap<Uuid, users::Model>> {
    let users = UserRepository::new((*state.db).clone());
    Ok(users.list().await?.into_iter().map(|u| (u.id, u)).collect())
}

/// GET /meetings - all meetings in date order, attendees hydrated.
async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<MeetingResponse>>> {
    let repo = MeetingRepository::new((*state.db).clone());

    let (items, users_by_id) = tokio::try_join!(
        async { repo.list().await.map_err(ApiError::from) },
        user_index(&state)
    )?;

    Ok(Json(
        items
            .into_iter()
            .map(|m| to_response(m, &users_by_id))
            .collect(),
    ))
}

/// POST /meetings.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<MeetingResponse>)> {
    let title = require(payload.title, "title and date are required")?;
    let date = payload
        .date
        .ok_or_else(|| ApiError::validation("title and date are required"))?;

    let repo = MeetingRepository::new((*state.db).clone());
    let item = repo
        .create(CreateMeetingInput {
            title,
            date,
            time: payload.time,
            video_link: payload.video_link.unwrap_or_default(),
            notes: payload.notes.unwrap_or_default(),
            attendee_ids: payload.attendee_ids.unwrap_or_default(),
            created_by_id: auth.user_id(),
        })
        .await?;

    let users_by_id = user_index(&state).await?;
    Ok((StatusCode::CREATED, Json(to_response(item, &users_by_id))))
}

/// PATCH /meetings/{id}.
async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchRequest>,
) -> ApiResult<Json<MeetingResponse>> {
    let repo = MeetingRepository::new((*state.db).clone());
    let item = repo
        .update(
            id,
            UpdateMeetingInput {
                title: payload.title,
                date: payload.date,
                time: payload.time.map(Some),
                video_link: payload.video_link,
                notes: payload.notes,
                attendee_ids: payload.attendee_ids,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Meeting not found"))?;

    let users_by_id = user_index(&state).await?;
    Ok(Json(to_response(item, &users_by_id)))
}

/// DELETE /meetings/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = MeetingRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Meeting not found"));
    }
    Ok(Json(json!({ "ok": true })))
}
