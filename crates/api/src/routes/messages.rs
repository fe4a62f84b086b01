//! Internal messaging routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch},
};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::entities::messages;
use coveted_db::{MessageRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the messages router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list).post(create))
        .route("/messages/{id}/read", patch(mark_read))
        .route("/messages/{id}", delete(remove))
}

/// Send payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest {
    subject: Option<String>,
    content: Option<String>,
    receiver_id: Option<Uuid>,
}

/// Message response with hydrated sender/receiver.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageResponse {
    id: Uuid,
    subject: String,
    content: String,
    sender_id: Uuid,
    receiver_id: Uuid,
    read: bool,
    sender: Option<NamedRef>,
    receiver: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(
    item: messages::Model,
    names: &std::collections::HashMap<Uuid, String>,
) -> MessageResponse {
    let named = |id: Uuid| names.get(&id).map(|name| NamedRef::new(id, name.clone()));
    MessageResponse {
        id: item.id,
        subject: item.subject,
        content: item.content,
        sender_id: item.sender_id,
        receiver_id: item.receiver_id,
        read: item.read,
        sender: named(item.sender_id),
        receiver: named(item.receiver_id),
        created_at: item.created_at,
    }
}

/// GET /messages - messages the caller sent or received.
async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let repo = MessageRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let items = repo.list_for(auth.user_id()).await?;
    let mut ids: Vec<Uuid> = Vec::with_capacity(items.len() * 2);
    for m in &items {
        ids.push(m.sender_id);
        ids.push(m.receiver_id);
    }
    let names = users.name_map(&ids).await?;

    Ok(Json(
        items.into_iter().map(|m| to_response(m, &names)).collect(),
    ))
}

/// POST /messages - send a message.
async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<SendRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let subject = require(payload.subject, "subject, content, and receiverId are required")?;
    let content = require(payload.content, "subject, content, and receiverId are required")?;
    let receiver_id = payload
        .receiver_id
        .ok_or_else(|| ApiError::validation("subject, content, and receiverId are required"))?;

    let repo = MessageRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let item = repo
        .create(&subject, &content, auth.user_id(), receiver_id)
        .await?;
    let names = users.name_map(&[item.sender_id, item.receiver_id]).await?;

    Ok((StatusCode::CREATED, Json(to_response(item, &names))))
}

/// PATCH /messages/{id}/read - mark a message read.
async fn mark_read(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<messages::Model>> {
    let repo = MessageRepository::new((*state.db).clone());
    let item = repo
        .mark_read(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;
    Ok(Json(item))
}

/// DELETE /messages/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = MessageRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Message not found"));
    }
    Ok(Json(json!({ "ok": true })))
}
