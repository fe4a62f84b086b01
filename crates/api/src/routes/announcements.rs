//! Announcement routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::entities::announcements;
use coveted_db::{AnnouncementRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the announcements router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/announcements", get(list).post(create))
        .route("/announcements/{id}", delete(remove))
}

/// Create payload.
#[derive(Debug, Deserialize)]
struct CreateRequest {
    title: Option<String>,
    content: Option<String>,
}

/// Announcement response with hydrated author.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnnouncementResponse {
    id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    author: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(
    item: announcements::Model,
    names: &std::collections::HashMap<Uuid, String>,
) -> AnnouncementResponse {
    AnnouncementResponse {
        id: item.id,
        title: item.title,
        content: item.content,
        author_id: item.author_id,
        author: names
            .get(&item.author_id)
            .map(|name| NamedRef::new(item.author_id, name.clone())),
        created_at: item.created_at,
    }
}

/// GET /announcements - all announcements, newest first.
async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<AnnouncementResponse>>> {
    let repo = AnnouncementRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let items = repo.list().await?;
    let author_ids: Vec<Uuid> = items.iter().map(|a| a.author_id).collect();
    let names = users.name_map(&author_ids).await?;

    Ok(Json(
        items.into_iter().map(|a| to_response(a, &names)).collect(),
    ))
}

/// POST /announcements - publish an announcement.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<AnnouncementResponse>)> {
    let title = require(payload.title, "title and content are required")?;
    let content = require(payload.content, "title and content are required")?;

    let repo = AnnouncementRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let item = repo.create(&title, &content, auth.user_id()).await?;
    let names = users.name_map(&[item.author_id]).await?;

    Ok((StatusCode::CREATED, Json(to_response(item, &names))))
}

/// DELETE /announcements/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = AnnouncementRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Announcement not found"));
    }
    Ok(Json(json!({ "ok": true })))
}
