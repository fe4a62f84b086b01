//! HR/operations report aggregation.
//!
//! Builds the `/reports` activity rollup and the employee-performance rows
//! from already-fetched records. Scope (mine vs org-wide) is decided by the
//! caller; this module only does the math.

mod service;
mod types;

pub use service::{build_activity_report, employee_performance};
pub use types::{
    ActivityReport, EmployeePerformance, LeaveRecord, LeaveStatus, LeaveStatusCounts,
    LeaveSummary, MessageSummary, TaskPriority, TaskPriorityCounts, TaskRecord, TaskStatus,
    TaskStatusCounts, TaskSummary, TimeEntryRecord, TimeSummary, UserRecord,
};

#[cfg(test)]
mod tests;
