//! Sales lead repository.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::leads;

/// Fields for creating a lead.
#[derive(Debug, Clone)]
pub struct CreateLeadInput {
    /// Contact name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Where the lead came from.
    pub source: String,
    /// Pipeline stage.
    pub stage: String,
    /// Estimated deal value.
    pub value: Decimal,
    /// Free-form notes.
    pub notes: String,
    /// Assigned user, if any.
    pub assignee_id: Option<Uuid>,
}

/// Partial update for a lead.
#[derive(Debug, Clone, Default)]
pub struct UpdateLeadInput {
    /// New contact name.
    pub name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone.
    pub phone: Option<String>,
    /// New source.
    pub source: Option<String>,
    /// New stage.
    pub stage: Option<String>,
    /// New value.
    pub value: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
    /// New assignee; `Some(None)` clears the assignment.
    pub assignee_id: Option<Option<Uuid>>,
}

/// Lead repository.
#[derive(Debug, Clone)]
pub struct LeadRepository {
    db: DatabaseConnection,
}

impl LeadRepository {
    /// Creates a new lead repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists leads, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<leads::Model>, DbErr> {
        leads::Entity::find()
            .order_by_desc(leads::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates a lead.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateLeadInput) -> Result<leads::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let lead = leads::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            source: Set(input.source),
            stage: Set(input.stage),
            value: Set(input.value),
            notes: Set(input.notes),
            assignee_id: Set(input.assignee_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        lead.insert(&self.db).await
    }

    /// Applies a partial update (including stage moves). Returns `None`
    /// when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateLeadInput,
    ) -> Result<Option<leads::Model>, DbErr> {
        let Some(lead) = leads::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: leads::ActiveModel = lead.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(email) = input.email {
            active.email = Set(email);
        }
        if let Some(phone) = input.phone {
            active.phone = Set(phone);
        }
        if let Some(source) = input.source {
            active.source = Set(source);
        }
        if let Some(stage) = input.stage {
            active.stage = Set(stage);
        }
        if let Some(value) = input.value {
            active.value = Set(value);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(assignee_id) = input.assignee_id {
            active.assignee_id = Set(assignee_id);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a lead. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = leads::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
