//! Report aggregation over fetched records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::finance::round_percent;
use crate::timeclock::{month_start, round_hours, week_start};

use super::types::{
    ActivityReport, EmployeePerformance, LeaveRecord, LeaveStatus, LeaveStatusCounts,
    LeaveSummary, MessageSummary, TaskPriority, TaskRecord, TaskStatus, TaskSummary,
    TaskPriorityCounts, TaskStatusCounts, TimeEntryRecord, TimeSummary, UserRecord,
};

/// Computes task-completion rates per user.
///
/// `tasks` must already be filtered to the requested creation range. Users
/// with no assigned tasks in range are excluded from the output so reports
/// stay focused on active contributors.
#[must_use]
pub fn employee_performance(users: &[UserRecord], tasks: &[TaskRecord]) -> Vec<EmployeePerformance> {
    users
        .iter()
        .filter_map(|user| {
            let total = tasks.iter().filter(|t| t.assignee_id == user.id).count() as u64;
            if total == 0 {
                return None;
            }
            let completed = tasks
                .iter()
                .filter(|t| t.assignee_id == user.id && t.status == TaskStatus::Done)
                .count() as u64;
            Some(EmployeePerformance {
                id: user.id,
                name: user.name.clone(),
                total_jobs: total,
                completed,
                completion_rate: round_percent(Decimal::from(completed), Decimal::from(total)),
                avg_rating: Decimal::ZERO,
                reviews: 0,
            })
        })
        .collect()
}

/// Builds the `/reports` rollup from records already scoped to the caller
/// (or org-wide for privileged callers).
///
/// `today` is injected so the week/month boundaries are deterministic.
#[must_use]
pub fn build_activity_report(
    time_entries: &[TimeEntryRecord],
    leaves: &[LeaveRecord],
    tasks: &[TaskRecord],
    unread_messages: u64,
    today: NaiveDate,
) -> ActivityReport {
    let week = week_start(today);
    let month = month_start(today);

    let hours_this_week = round_hours(
        time_entries
            .iter()
            .filter(|e| e.date >= week)
            .map(|e| e.hours)
            .sum(),
    );
    let hours_this_month = round_hours(
        time_entries
            .iter()
            .filter(|e| e.date >= month)
            .map(|e| e.hours)
            .sum(),
    );
    let mut hours_by_user: BTreeMap<String, Decimal> = BTreeMap::new();
    for entry in time_entries.iter().filter(|e| e.date >= month) {
        *hours_by_user
            .entry(entry.user_name.clone())
            .or_insert(Decimal::ZERO) += entry.hours;
    }

    let mut leave_counts = LeaveStatusCounts::default();
    let mut leave_by_type: BTreeMap<String, u64> = BTreeMap::new();
    for leave in leaves {
        match leave.status {
            LeaveStatus::Pending => leave_counts.pending += 1,
            LeaveStatus::Approved => leave_counts.approved += 1,
            LeaveStatus::Denied => leave_counts.denied += 1,
        }
        if leave.status == LeaveStatus::Approved {
            *leave_by_type.entry(leave.leave_type.clone()).or_insert(0) += 1;
        }
    }

    let mut task_counts = TaskStatusCounts::default();
    let mut by_priority = TaskPriorityCounts::default();
    let mut overdue = 0u64;
    for task in tasks {
        match task.status {
            TaskStatus::Todo => task_counts.todo += 1,
            TaskStatus::InProgress => task_counts.in_progress += 1,
            TaskStatus::Done => task_counts.done += 1,
        }
        if task.status != TaskStatus::Done {
            match task.priority {
                TaskPriority::High => by_priority.high += 1,
                TaskPriority::Medium => by_priority.medium += 1,
                TaskPriority::Low => by_priority.low += 1,
            }
            if task.due_date.is_some_and(|due| due < today) {
                overdue += 1;
            }
        }
    }

    ActivityReport {
        time: TimeSummary {
            hours_this_week,
            hours_this_month,
            hours_by_user,
        },
        leave: LeaveSummary {
            counts: leave_counts,
            by_type: leave_by_type,
            total: leaves.len() as u64,
        },
        tasks: TaskSummary {
            counts: task_counts,
            by_priority,
            overdue,
            total: tasks.len() as u64,
        },
        messages: MessageSummary {
            unread: unread_messages,
        },
    }
}
