//! Time tracking routes: manual entries plus clock in/out.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use coveted_core::timeclock::{sum_hours, week_start, worked_hours};
use coveted_db::TimeEntryRepository;
use coveted_db::entities::time_entries;

/// Creates the time router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/time", get(list).post(create_manual))
        .route("/time/clock-in", post(clock_in))
        .route("/time/{id}/clock-out", patch(clock_out))
        .route("/time/{id}", delete(remove))
}

/// Manual entry payload.
#[derive(Debug, Deserialize)]
struct ManualEntryRequest {
    date: Option<chrono::NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    hours: Option<Decimal>,
    note: Option<String>,
}

/// Entry list with today's and this week's totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeListResponse {
    entries: Vec<time_entries::Model>,
    #[serde(with = "rust_decimal::serde::float")]
    today: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    this_week: Decimal,
}

/// GET /time - the caller's entries plus today/this-week totals.
async fn list(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<TimeListResponse>> {
    let repo = TimeEntryRepository::new((*state.db).clone());
    let entries = repo.list_for(auth.user_id()).await?;

    let today = state.today();
    let week = week_start(today);
    let today_total = sum_hours(entries.iter().filter(|e| e.date == today).map(|e| e.hours));
    let week_total = sum_hours(entries.iter().filter(|e| e.date >= week).map(|e| e.hours));

    Ok(Json(TimeListResponse {
        entries,
        today: today_total,
        this_week: week_total,
    }))
}

/// POST /time - record a manual entry.
async fn create_manual(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ManualEntryRequest>,
) -> ApiResult<(StatusCode, Json<time_entries::Model>)> {
    let (Some(date), Some(hours)) = (payload.date, payload.hours) else {
        return Err(ApiError::validation("date and hours are required"));
    };
    if hours.is_sign_negative() {
        return Err(ApiError::validation("hours must be non-negative"));
    }

    let repo = TimeEntryRepository::new((*state.db).clone());
    let entry = repo
        .create_manual(
            auth.user_id(),
            date,
            hours,
            payload.note.as_deref().unwrap_or(""),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /time/clock-in - open an entry stamped with the current time.
///
/// A second clock-in while one entry is still open is rejected; the
/// original system left this unenforced and relied on the UI.
async fn clock_in(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<(StatusCode, Json<time_entries::Model>)> {
    let repo = TimeEntryRepository::new((*state.db).clone());

    if repo.find_active(auth.user_id()).await?.is_some() {
        return Err(ApiError::conflict("Already clocked in"));
    }

    let entry = repo
        .clock_in(auth.user_id(), state.today(), &state.clock.time_of_day())
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PATCH /time/{id}/clock-out - close an entry and compute hours.
async fn clock_out(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<time_entries::Model>> {
    let repo = TimeEntryRepository::new((*state.db).clone());

    let entry = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::validation("No active clock-in found"))?;
    let Some(clock_in_stamp) = entry.clock_in.as_deref() else {
        return Err(ApiError::validation("No active clock-in found"));
    };

    let stamp = state.clock.time_of_day();
    let hours =
        worked_hours(clock_in_stamp, &stamp).map_err(|e| ApiError::internal(e.to_string()))?;

    let updated = repo
        .complete_clock_out(id, &stamp, hours)
        .await?
        .ok_or_else(|| ApiError::not_found("Time entry not found"))?;
    Ok(Json(updated))
}

/// DELETE /time/{id}.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = TimeEntryRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Time entry not found"));
    }
    Ok(Json(json!({ "ok": true })))
}
