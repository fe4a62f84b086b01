//! `SeaORM` active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User role; controls org-wide visibility and admin actions.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular employee; sees own records only.
    #[sea_orm(string_value = "employee")]
    Employee,
    /// Manager; sees org-wide records, can invite users.
    #[sea_orm(string_value = "manager")]
    Manager,
    /// Administrator; full access.
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl UserRole {
    /// Lowercase wire representation, matching the JWT role claim.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

/// Leave request status; transitions pending -> approved|denied once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_status")]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    /// Awaiting review.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved by a reviewer.
    #[sea_orm(string_value = "approved")]
    Approved,
    /// Denied by a reviewer.
    #[sea_orm(string_value = "denied")]
    Denied,
}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Not started.
    #[sea_orm(string_value = "todo")]
    Todo,
    /// Being worked on.
    #[sea_orm(string_value = "in-progress")]
    #[serde(rename = "in-progress")]
    InProgress,
    /// Finished.
    #[sea_orm(string_value = "done")]
    Done,
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    #[sea_orm(string_value = "low")]
    Low,
    /// Default priority.
    #[sea_orm(string_value = "medium")]
    Medium,
    /// High priority.
    #[sea_orm(string_value = "high")]
    High,
}

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_category")]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    /// Property maintenance.
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    /// Consumables and supplies.
    #[sea_orm(string_value = "supplies")]
    Supplies,
    /// Marketing spend.
    #[sea_orm(string_value = "marketing")]
    Marketing,
    /// Utility bills.
    #[sea_orm(string_value = "utilities")]
    Utilities,
    /// Payroll costs.
    #[sea_orm(string_value = "payroll")]
    Payroll,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Revenue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "revenue_category")]
#[serde(rename_all = "lowercase")]
pub enum RevenueCategory {
    /// Long-term rent.
    #[sea_orm(string_value = "rent")]
    Rent,
    /// Short-term booking income.
    #[sea_orm(string_value = "booking")]
    Booking,
    /// Service fees.
    #[sea_orm(string_value = "service")]
    Service,
    /// Anything else.
    #[sea_orm(string_value = "other")]
    Other,
}

/// Property order fulfilment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Not yet ordered.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Ordered from the vendor.
    #[sea_orm(string_value = "ordered")]
    Ordered,
    /// Delivered to the property.
    #[sea_orm(string_value = "delivered")]
    Delivered,
    /// Installed and done.
    #[sea_orm(string_value = "installed")]
    Installed,
}

impl OrderStatus {
    /// Statuses that still count as an active (open) order.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Ordered)
    }
}

// Conversions into the pure reporting enums used by coveted-core.

impl From<LeaveStatus> for coveted_core::reporting::LeaveStatus {
    fn from(status: LeaveStatus) -> Self {
        match status {
            LeaveStatus::Pending => Self::Pending,
            LeaveStatus::Approved => Self::Approved,
            LeaveStatus::Denied => Self::Denied,
        }
    }
}

impl From<TaskStatus> for coveted_core::reporting::TaskStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Todo => Self::Todo,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Done => Self::Done,
        }
    }
}

impl From<TaskPriority> for coveted_core::reporting::TaskPriority {
    fn from(priority: TaskPriority) -> Self {
        match priority {
            TaskPriority::Low => Self::Low,
            TaskPriority::Medium => Self::Medium,
            TaskPriority::High => Self::High,
        }
    }
}
