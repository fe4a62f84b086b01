//! Operations repository: SOPs and schedule events.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{schedule_events, sops};

/// Fields for creating an SOP.
#[derive(Debug, Clone)]
pub struct CreateSopInput {
    /// SOP title.
    pub title: String,
    /// Category label.
    pub category: String,
    /// Document body.
    pub content: String,
}

/// Partial update for an SOP.
#[derive(Debug, Clone, Default)]
pub struct UpdateSopInput {
    /// New title.
    pub title: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New body.
    pub content: Option<String>,
}

/// Fields for creating a schedule event.
#[derive(Debug, Clone)]
pub struct CreateEventInput {
    /// Event title.
    pub title: String,
    /// Event date.
    pub date: NaiveDate,
    /// Optional `HH:MM` start.
    pub start_time: Option<String>,
    /// Optional `HH:MM` end.
    pub end_time: Option<String>,
    /// Event type label.
    pub event_type: String,
    /// Assigned user, if any.
    pub assignee_id: Option<Uuid>,
    /// Free-form notes.
    pub notes: String,
}

/// Partial update for a schedule event.
#[derive(Debug, Clone, Default)]
pub struct UpdateEventInput {
    /// New title.
    pub title: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New start time.
    pub start_time: Option<Option<String>>,
    /// New end time.
    pub end_time: Option<Option<String>>,
    /// New type label.
    pub event_type: Option<String>,
    /// New assignee; `Some(None)` clears it.
    pub assignee_id: Option<Option<Uuid>>,
    /// New notes.
    pub notes: Option<String>,
    /// New done flag.
    pub done: Option<bool>,
}

/// Operations repository.
#[derive(Debug, Clone)]
pub struct OperationsRepository {
    db: DatabaseConnection,
}

impl OperationsRepository {
    /// Creates a new operations repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // SOPs
    // ========================================================================

    /// Lists SOPs, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_sops(&self) -> Result<Vec<sops::Model>, DbErr> {
        sops::Entity::find()
            .order_by_desc(sops::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates an SOP.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_sop(&self, input: CreateSopInput) -> Result<sops::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let sop = sops::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            category: Set(input.category),
            content: Set(input.content),
            created_at: Set(now),
            updated_at: Set(now),
        };
        sop.insert(&self.db).await
    }

    /// Applies a partial update. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_sop(
        &self,
        id: Uuid,
        input: UpdateSopInput,
    ) -> Result<Option<sops::Model>, DbErr> {
        let Some(sop) = sops::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: sops::ActiveModel = sop.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(content) = input.content {
            active.content = Set(content);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes an SOP. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_sop(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = sops::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Schedule events
    // ========================================================================

    /// Lists events by date then start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_events(&self) -> Result<Vec<schedule_events::Model>, DbErr> {
        schedule_events::Entity::find()
            .order_by_asc(schedule_events::Column::Date)
            .order_by_asc(schedule_events::Column::StartTime)
            .all(&self.db)
            .await
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_event(
        &self,
        input: CreateEventInput,
    ) -> Result<schedule_events::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let event = schedule_events::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            date: Set(input.date),
            start_time: Set(input.start_time),
            end_time: Set(input.end_time),
            event_type: Set(input.event_type),
            assignee_id: Set(input.assignee_id),
            notes: Set(input.notes),
            done: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        event.insert(&self.db).await
    }

    /// Applies a partial update. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_event(
        &self,
        id: Uuid,
        input: UpdateEventInput,
    ) -> Result<Option<schedule_events::Model>, DbErr> {
        let Some(event) = schedule_events::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: schedule_events::ActiveModel = event.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(start_time) = input.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = input.end_time {
            active.end_time = Set(end_time);
        }
        if let Some(event_type) = input.event_type {
            active.event_type = Set(event_type);
        }
        if let Some(assignee_id) = input.assignee_id {
            active.assignee_id = Set(assignee_id);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(done) = input.done {
            active.done = Set(done);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes an event. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_event(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = schedule_events::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
