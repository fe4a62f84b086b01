//! Performance goal repository.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::performance_goals;

/// Fields for creating a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalInput {
    /// Owning user.
    pub user_id: Uuid,
    /// Goal title.
    pub title: String,
    /// Goal description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Optional target date.
    pub target_date: Option<NaiveDate>,
}

/// Partial update for a goal.
#[derive(Debug, Clone, Default)]
pub struct UpdateGoalInput {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New category.
    pub category: Option<String>,
    /// New status label.
    pub status: Option<String>,
    /// New progress (0-100).
    pub progress: Option<i32>,
    /// New target date.
    pub target_date: Option<NaiveDate>,
}

/// Performance goal repository.
#[derive(Debug, Clone)]
pub struct PerformanceGoalRepository {
    db: DatabaseConnection,
}

impl PerformanceGoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists goals, newest first; `scope` of `None` means org-wide.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: Option<Uuid>) -> Result<Vec<performance_goals::Model>, DbErr> {
        let mut query = performance_goals::Entity::find();
        if let Some(user_id) = scope {
            query = query.filter(performance_goals::Column::UserId.eq(user_id));
        }
        query
            .order_by_desc(performance_goals::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates a goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateGoalInput) -> Result<performance_goals::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let goal = performance_goals::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(input.user_id),
            title: Set(input.title),
            description: Set(input.description),
            category: Set(input.category),
            status: Set("active".to_string()),
            progress: Set(0),
            target_date: Set(input.target_date),
            created_at: Set(now),
            updated_at: Set(now),
        };
        goal.insert(&self.db).await
    }

    /// Applies a partial update. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateGoalInput,
    ) -> Result<Option<performance_goals::Model>, DbErr> {
        let Some(goal) = performance_goals::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: performance_goals::ActiveModel = goal.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(category) = input.category {
            active.category = Set(category);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(progress) = input.progress {
            active.progress = Set(progress);
        }
        if let Some(target_date) = input.target_date {
            active.target_date = Set(Some(target_date));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a goal. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = performance_goals::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
