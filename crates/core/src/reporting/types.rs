//! Report data types.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use coveted_shared::types::decimal_map;

/// Leave request lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting a reviewer decision.
    Pending,
    /// Approved by a reviewer.
    Approved,
    /// Denied by a reviewer.
    Denied,
}

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started.
    Todo,
    /// Being worked on.
    #[serde(rename = "in-progress")]
    InProgress,
    /// Finished.
    Done,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Default priority.
    Medium,
    /// High priority.
    High,
}

/// User identity row for performance reporting.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// Time entry row feeding the report.
#[derive(Debug, Clone)]
pub struct TimeEntryRecord {
    /// Name of the user who logged the entry.
    pub user_name: String,
    /// Entry date.
    pub date: NaiveDate,
    /// Hours logged.
    pub hours: Decimal,
}

/// Leave request row feeding the report.
#[derive(Debug, Clone)]
pub struct LeaveRecord {
    /// Current status.
    pub status: LeaveStatus,
    /// Leave type label (vacation, sick, ...).
    pub leave_type: String,
}

/// Task row feeding the report and performance aggregations.
#[derive(Debug, Clone)]
pub struct TaskRecord {
    /// Assigned user.
    pub assignee_id: Uuid,
    /// Current status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Optional due date; overdue = not done and due before today.
    pub due_date: Option<NaiveDate>,
}

/// Per-user task completion row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePerformance {
    /// User ID.
    pub id: Uuid,
    /// User name.
    pub name: String,
    /// Tasks assigned in range.
    pub total_jobs: u64,
    /// Tasks completed in range.
    pub completed: u64,
    /// Integer completion percentage.
    pub completion_rate: i32,
    /// Placeholder for a future ratings feature; always zero.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_rating: Decimal,
    /// Placeholder for a future reviews feature; always zero.
    pub reviews: u64,
}

/// The `/reports` aggregation payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    /// Time tracking rollup.
    pub time: TimeSummary,
    /// Leave request rollup.
    pub leave: LeaveSummary,
    /// Task rollup.
    pub tasks: TaskSummary,
    /// Unread message count for the caller.
    pub messages: MessageSummary,
}

/// Hours rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSummary {
    /// Hours logged since the start of the current week.
    #[serde(with = "rust_decimal::serde::float")]
    pub hours_this_week: Decimal,
    /// Hours logged since the start of the current month.
    #[serde(with = "rust_decimal::serde::float")]
    pub hours_this_month: Decimal,
    /// Current-month hours per user name.
    #[serde(with = "decimal_map")]
    pub hours_by_user: BTreeMap<String, Decimal>,
}

/// Leave counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStatusCounts {
    /// Pending requests.
    pub pending: u64,
    /// Approved requests.
    pub approved: u64,
    /// Denied requests.
    pub denied: u64,
}

/// Leave rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSummary {
    /// Counts by status.
    pub counts: LeaveStatusCounts,
    /// Approved requests per leave type.
    pub by_type: BTreeMap<String, u64>,
    /// Total requests in scope.
    pub total: u64,
}

/// Task counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusCounts {
    /// Not started.
    pub todo: u64,
    /// Being worked on.
    #[serde(rename = "in-progress")]
    pub in_progress: u64,
    /// Finished.
    pub done: u64,
}

/// Open-task counts by priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPriorityCounts {
    /// High priority.
    pub high: u64,
    /// Medium priority.
    pub medium: u64,
    /// Low priority.
    pub low: u64,
}

/// Task rollup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Counts by status.
    pub counts: TaskStatusCounts,
    /// Priority counts over non-done tasks.
    pub by_priority: TaskPriorityCounts,
    /// Not done and due before today.
    pub overdue: u64,
    /// Total tasks in scope.
    pub total: u64,
}

/// Unread message rollup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    /// Unread count for the caller.
    pub unread: u64,
}
