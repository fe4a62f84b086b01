//! Onboarding checklist repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::onboarding_steps;

/// Fields for creating an onboarding step.
#[derive(Debug, Clone)]
pub struct CreateStepInput {
    /// Assigned user.
    pub assignee_id: Uuid,
    /// Step title.
    pub title: String,
    /// Step description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Position in the checklist.
    pub sort_order: i32,
}

/// Partial update for an onboarding step.
#[derive(Debug, Clone, Default)]
pub struct UpdateStepInput {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New done flag.
    pub done: Option<bool>,
    /// New position.
    pub sort_order: Option<i32>,
}

/// Onboarding step repository.
#[derive(Debug, Clone)]
pub struct OnboardingRepository {
    db: DatabaseConnection,
}

impl OnboardingRepository {
    /// Creates a new onboarding repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists steps by sort order then creation time; `scope` of `None`
    /// means org-wide.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: Option<Uuid>) -> Result<Vec<onboarding_steps::Model>, DbErr> {
        let mut query = onboarding_steps::Entity::find();
        if let Some(user_id) = scope {
            query = query.filter(onboarding_steps::Column::AssigneeId.eq(user_id));
        }
        query
            .order_by_asc(onboarding_steps::Column::SortOrder)
            .order_by_asc(onboarding_steps::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates a step.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateStepInput) -> Result<onboarding_steps::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let step = onboarding_steps::ActiveModel {
            id: Set(Uuid::new_v4()),
            assignee_id: Set(input.assignee_id),
            title: Set(input.title),
            description: Set(input.description),
            category: Set(input.category),
            done: Set(false),
            sort_order: Set(input.sort_order),
            created_at: Set(now),
            updated_at: Set(now),
        };
        step.insert(&self.db).await
    }

    /// Applies a partial update. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateStepInput,
    ) -> Result<Option<onboarding_steps::Model>, DbErr> {
        let Some(step) = onboarding_steps::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: onboarding_steps::ActiveModel = step.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(done) = input.done {
            active.done = Set(done);
        }
        if let Some(sort_order) = input.sort_order {
            active.sort_order = Set(sort_order);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a step. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = onboarding_steps::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
