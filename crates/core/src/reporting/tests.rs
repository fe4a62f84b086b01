//! Tests for report aggregation.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::service::{build_activity_report, employee_performance};
use super::types::{
    LeaveRecord, LeaveStatus, TaskPriority, TaskRecord, TaskStatus, TimeEntryRecord, UserRecord,
};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn user(name: &str) -> UserRecord {
    UserRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
    }
}

fn task(assignee: Uuid, status: TaskStatus) -> TaskRecord {
    TaskRecord {
        assignee_id: assignee,
        status,
        priority: TaskPriority::Medium,
        due_date: None,
    }
}

fn entry(name: &str, day: &str, hours: rust_decimal::Decimal) -> TimeEntryRecord {
    TimeEntryRecord {
        user_name: name.to_string(),
        date: date(day),
        hours,
    }
}

// ============================================================================
// Employee performance
// ============================================================================

#[test]
fn test_zero_task_users_are_excluded() {
    let active = user("Avery");
    let idle = user("Blake");
    let tasks = vec![task(active.id, TaskStatus::Done)];

    let rows = employee_performance(&[active.clone(), idle], &tasks);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, active.id);
}

#[test]
fn test_completion_rate_rounds() {
    let worker = user("Avery");
    let tasks = vec![
        task(worker.id, TaskStatus::Done),
        task(worker.id, TaskStatus::Todo),
        task(worker.id, TaskStatus::InProgress),
    ];

    let rows = employee_performance(std::slice::from_ref(&worker), &tasks);

    assert_eq!(rows[0].total_jobs, 3);
    assert_eq!(rows[0].completed, 1);
    assert_eq!(rows[0].completion_rate, 33);
}

#[test]
fn test_rating_placeholders_stay_zero() {
    let worker = user("Avery");
    let tasks = vec![task(worker.id, TaskStatus::Done)];

    let rows = employee_performance(std::slice::from_ref(&worker), &tasks);

    assert_eq!(rows[0].completion_rate, 100);
    assert!(rows[0].avg_rating.is_zero());
    assert_eq!(rows[0].reviews, 0);

    let json = serde_json::to_value(&rows[0]).unwrap();
    assert_eq!(json["avgRating"], serde_json::json!(0.0));
    assert_eq!(json["totalJobs"], serde_json::json!(1));
}

// ============================================================================
// Activity report
// ============================================================================

#[test]
fn test_week_and_month_hour_windows() {
    // Friday 2024-03-15; week started Sunday 2024-03-10.
    let today = date("2024-03-15");
    let entries = vec![
        entry("Avery", "2024-03-15", dec!(2.5)),
        entry("Avery", "2024-03-10", dec!(4)), // week start, inclusive
        entry("Avery", "2024-03-09", dec!(8)), // in month, before week
        entry("Avery", "2024-02-28", dec!(6)), // previous month
    ];

    let report = build_activity_report(&entries, &[], &[], 0, today);

    assert_eq!(report.time.hours_this_week, dec!(6.5));
    assert_eq!(report.time.hours_this_month, dec!(14.5));
    assert_eq!(report.time.hours_by_user["Avery"], dec!(14.5));
}

#[test]
fn test_leave_counts_and_approved_types() {
    let leaves = vec![
        LeaveRecord {
            status: LeaveStatus::Approved,
            leave_type: "vacation".to_string(),
        },
        LeaveRecord {
            status: LeaveStatus::Approved,
            leave_type: "sick".to_string(),
        },
        LeaveRecord {
            status: LeaveStatus::Pending,
            leave_type: "vacation".to_string(),
        },
        LeaveRecord {
            status: LeaveStatus::Denied,
            leave_type: "sick".to_string(),
        },
    ];

    let report = build_activity_report(&[], &leaves, &[], 0, date("2024-03-15"));

    assert_eq!(report.leave.counts.pending, 1);
    assert_eq!(report.leave.counts.approved, 2);
    assert_eq!(report.leave.counts.denied, 1);
    assert_eq!(report.leave.total, 4);
    // Only approved requests feed the by-type map.
    assert_eq!(report.leave.by_type["vacation"], 1);
    assert_eq!(report.leave.by_type["sick"], 1);
}

#[test]
fn test_task_counts_priorities_and_overdue() {
    let me = Uuid::new_v4();
    let today = date("2024-03-15");
    let tasks = vec![
        TaskRecord {
            assignee_id: me,
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            due_date: Some(date("2024-03-14")), // overdue
        },
        TaskRecord {
            assignee_id: me,
            status: TaskStatus::InProgress,
            priority: TaskPriority::Low,
            due_date: Some(date("2024-03-15")), // due today, not overdue
        },
        TaskRecord {
            assignee_id: me,
            status: TaskStatus::Done,
            priority: TaskPriority::High,
            due_date: Some(date("2020-01-01")), // done tasks never overdue
        },
    ];

    let report = build_activity_report(&[], &[], &tasks, 0, today);

    assert_eq!(report.tasks.counts.todo, 1);
    assert_eq!(report.tasks.counts.in_progress, 1);
    assert_eq!(report.tasks.counts.done, 1);
    // Done tasks are excluded from the priority breakdown.
    assert_eq!(report.tasks.by_priority.high, 1);
    assert_eq!(report.tasks.by_priority.low, 1);
    assert_eq!(report.tasks.by_priority.medium, 0);
    assert_eq!(report.tasks.overdue, 1);
    assert_eq!(report.tasks.total, 3);
}

#[test]
fn test_unread_messages_pass_through() {
    let report = build_activity_report(&[], &[], &[], 7, date("2024-03-15"));
    assert_eq!(report.messages.unread, 7);
}

// ============================================================================
// Role widening
// ============================================================================

#[test]
fn test_org_wide_counts_dominate_user_scoped_counts() {
    let mine = vec![LeaveRecord {
        status: LeaveStatus::Pending,
        leave_type: "vacation".to_string(),
    }];
    let org_wide = vec![
        mine[0].clone(),
        LeaveRecord {
            status: LeaveStatus::Pending,
            leave_type: "sick".to_string(),
        },
        LeaveRecord {
            status: LeaveStatus::Approved,
            leave_type: "sick".to_string(),
        },
    ];
    let today = date("2024-03-15");

    let employee_view = build_activity_report(&[], &mine, &[], 0, today);
    let admin_view = build_activity_report(&[], &org_wide, &[], 0, today);

    assert!(admin_view.leave.counts.pending >= employee_view.leave.counts.pending);
    assert!(admin_view.leave.total >= employee_view.leave.total);
}

// ============================================================================
// Determinism and JSON shape
// ============================================================================

#[test]
fn test_report_is_deterministic() {
    let entries = vec![entry("Avery", "2024-03-11", dec!(3.25))];
    let today = date("2024-03-15");

    let first = build_activity_report(&entries, &[], &[], 2, today);
    let second = build_activity_report(&entries, &[], &[], 2, today);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_report_json_shape() {
    let me = Uuid::new_v4();
    let tasks = vec![TaskRecord {
        assignee_id: me,
        status: TaskStatus::InProgress,
        priority: TaskPriority::High,
        due_date: None,
    }];
    let report = build_activity_report(&[], &[], &tasks, 0, date("2024-03-15"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tasks"]["counts"]["in-progress"], serde_json::json!(1));
    assert_eq!(json["tasks"]["byPriority"]["high"], serde_json::json!(1));
    assert!(json["time"]["hoursThisWeek"].is_number());
}
