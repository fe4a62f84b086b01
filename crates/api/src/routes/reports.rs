//! Report routes: the full activity rollup and the dashboard snapshot.

use axum::{Json, Router, extract::State, routing::get};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::AuthUser;
use coveted_core::reporting::{ActivityReport, build_activity_report};
use coveted_core::timeclock::{sum_hours, week_start};
use coveted_db::{
    LeaveRepository, MessageRepository, PropertyRepository, TaskRepository, TimeEntryRepository,
};

/// Creates the reports router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(full_report))
        .route("/reports/dashboard", get(dashboard))
}

/// Lightweight stat snapshot for the dashboard cards.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardSnapshot {
    active_orders: u64,
    properties: u64,
    my_tasks: u64,
    overdue: u64,
    messages: u64,
    pending_leave: u64,
    #[serde(with = "rust_decimal::serde::float")]
    hours_today: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    hours_this_week: Decimal,
}

/// GET /reports - aggregated HR statistics.
///
/// Admin/manager callers see org-wide time/leave/task data; everyone else
/// sees their own. Unread messages are always the caller's.
async fn full_report(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ActivityReport>> {
    let time_repo = TimeEntryRepository::new((*state.db).clone());
    let leave_repo = LeaveRepository::new((*state.db).clone());
    let task_repo = TaskRepository::new((*state.db).clone());
    let message_repo = MessageRepository::new((*state.db).clone());

    let scope = auth.scope();
    let (time_entries, leaves, tasks, unread) = tokio::try_join!(
        time_repo.records(scope),
        leave_repo.records(scope),
        task_repo.records(scope),
        message_repo.count_unread(auth.user_id())
    )?;

    Ok(Json(build_activity_report(
        &time_entries,
        &leaves,
        &tasks,
        unread,
        state.today(),
    )))
}

/// GET /reports/dashboard - one-call snapshot scoped to the caller.
///
/// Every sub-count is independent, so the reads fan out concurrently and
/// join; if any one fails the whole snapshot fails.
async fn dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardSnapshot>> {
    let property_repo = PropertyRepository::new((*state.db).clone());
    let task_repo = TaskRepository::new((*state.db).clone());
    let message_repo = MessageRepository::new((*state.db).clone());
    let leave_repo = LeaveRepository::new((*state.db).clone());
    let time_repo = TimeEntryRepository::new((*state.db).clone());

    let me = auth.user_id();
    let today = state.today();
    let week = week_start(today);

    let (
        active_orders,
        properties,
        my_tasks,
        overdue,
        messages,
        pending_leave,
        today_hours,
        week_hours,
    ) = tokio::try_join!(
        property_repo.count_active_orders(),
        property_repo.count(),
        task_repo.count_open(me),
        task_repo.count_overdue(me, today),
        message_repo.count_unread(me),
        leave_repo.count_pending(auth.scope()),
        time_repo.hours_on(me, today),
        time_repo.hours_since(me, week)
    )?;

    Ok(Json(DashboardSnapshot {
        active_orders,
        properties,
        my_tasks,
        overdue,
        messages,
        pending_leave,
        hours_today: sum_hours(today_hours),
        hours_this_week: sum_hours(week_hours),
    }))
}
