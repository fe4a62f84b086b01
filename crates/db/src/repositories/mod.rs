//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. Aggregation repositories return the plain record types
//! consumed by `coveted-core`.

pub mod announcement;
pub mod finance;
pub mod lead;
pub mod leave;
pub mod meeting;
pub mod message;
pub mod onboarding;
pub mod operations;
pub mod performance_goal;
pub mod property;
pub mod task;
pub mod time_entry;
pub mod user;

pub use announcement::AnnouncementRepository;
pub use finance::{CreateExpenseInput, CreateRevenueInput, FinanceRepository};
pub use lead::{CreateLeadInput, LeadRepository, UpdateLeadInput};
pub use leave::LeaveRepository;
pub use meeting::{CreateMeetingInput, MeetingRepository, UpdateMeetingInput};
pub use message::MessageRepository;
pub use onboarding::{CreateStepInput, OnboardingRepository, UpdateStepInput};
pub use operations::{
    CreateEventInput, CreateSopInput, OperationsRepository, UpdateEventInput, UpdateSopInput,
};
pub use performance_goal::{CreateGoalInput, PerformanceGoalRepository, UpdateGoalInput};
pub use property::{
    CreateOrderInput, CreatePropertyInput, PropertyRepository, PropertyWithChildren,
    UpdateOrderInput, UpdatePropertyInput,
};
pub use task::{CreateTaskInput, TaskRepository, UpdateTaskInput};
pub use time_entry::TimeEntryRepository;
pub use user::UserRepository;
