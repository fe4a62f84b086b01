//! `SeaORM` entity definitions.
//!
//! References between tables (`property_id`, `assignee_id`, `reviewer_id`,
//! ...) are deliberately loose: no database-level FK constraints and no
//! cascades, so deleting a property leaves its expenses in place and
//! aggregations must tolerate orphaned references.

pub mod sea_orm_active_enums;

pub mod announcements;
pub mod expenses;
pub mod leads;
pub mod leave_requests;
pub mod meetings;
pub mod messages;
pub mod onboarding_steps;
pub mod performance_goals;
pub mod properties;
pub mod property_orders;
pub mod revenues;
pub mod schedule_events;
pub mod setup_tasks;
pub mod sops;
pub mod tasks;
pub mod time_entries;
pub mod users;
