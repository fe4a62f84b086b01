//! Sales lead pipeline routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};
use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::entities::leads;
use coveted_db::repositories::lead::{CreateLeadInput, UpdateLeadInput};
use coveted_db::{LeadRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the sales router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list).post(create))
        .route("/sales/{id}", patch(update).delete(remove))
}

/// Create payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    source: Option<String>,
    stage: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    value: Option<Decimal>,
    notes: Option<String>,
    assignee_id: Option<Uuid>,
}

/// Patch payload; `assigneeId: null` clears the assignment.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct PatchRequest {
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    source: Option<String>,
    stage: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    value: Option<Decimal>,
    notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some")]
    assignee_id: Option<Option<Uuid>>,
}

/// Distinguishes an absent field from an explicit null.
fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}

/// Lead response with hydrated assignee.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeadResponse {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    source: String,
    stage: String,
    #[serde(with = "rust_decimal::serde::float")]
    value: Decimal,
    notes: String,
    assignee_id: Option<Uuid>,
    assignee: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn to_response(
    item: leads::Model,
    names: &std::collections::HashMap<Uuid, String>,
) -> LeadResponse {
    LeadResponse {
        id: item.id,
        name: item.name,
        email: item.email,
        phone: item.phone,
        source: item.source,
        stage: item.stage,
        value: item.value,
        notes: item.notes,
        assignee_id: item.assignee_id,
        assignee: item
            .assignee_id
            .and_then(|id| names.get(&id).map(|name| NamedRef::new(id, name.clone()))),
        created_at: item.created_at,
    }
}

async fn hydrate_one(state: &AppState, item: leads::Model) -> ApiResult<LeadResponse> {
    let users = UserRepository::new((*state.db).clone());
    let ids: Vec<Uuid> = item.assignee_id.into_iter().collect();
    let names = users.name_map(&ids).await?;
    Ok(to_response(item, &names))
}

/// GET /sales - all leads, newest first.
async fn list(State(state): State<AppState>, _auth: AuthUser) -> ApiResult<Json<Vec<LeadResponse>>> {
    let repo = LeadRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());

    let items = repo.list().await?;
    let ids: Vec<Uuid> = items.iter().filter_map(|l| l.assignee_id).collect();
    let names = users.name_map(&ids).await?;

    Ok(Json(
        items.into_iter().map(|l| to_response(l, &names)).collect(),
    ))
}

/// POST /sales - add a lead.
async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<LeadResponse>)> {
    let name = require(payload.name, "Name is required")?;

    let repo = LeadRepository::new((*state.db).clone());
    let item = repo
        .create(CreateLeadInput {
            name,
            email: payload.email.unwrap_or_default(),
            phone: payload.phone.unwrap_or_default(),
            source: payload.source.unwrap_or_else(|| "direct".to_string()),
            stage: payload.stage.unwrap_or_else(|| "new".to_string()),
            value: payload.value.unwrap_or(Decimal::ZERO),
            notes: payload.notes.unwrap_or_default(),
            assignee_id: payload.assignee_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(hydrate_one(&state, item).await?)))
}

/// PATCH /sales/{id} - update a lead, including stage moves.
async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchRequest>,
) -> ApiResult<Json<LeadResponse>> {
    let repo = LeadRepository::new((*state.db).clone());
    let item = repo
        .update(
            id,
            UpdateLeadInput {
                name: payload.name,
                email: payload.email,
                phone: payload.phone,
                source: payload.source,
                stage: payload.stage,
                value: payload.value,
                notes: payload.notes,
                assignee_id: payload.assignee_id,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Lead not found"))?;

    Ok(Json(hydrate_one(&state, item).await?))
}

/// DELETE /sales/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = LeadRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Lead not found"));
    }
    Ok(Json(json!({ "success": true })))
}
