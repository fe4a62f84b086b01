//! Announcement repository.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::announcements;

/// Announcement repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    db: DatabaseConnection,
}

impl AnnouncementRepository {
    /// Creates a new announcement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists announcements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<announcements::Model>, DbErr> {
        announcements::Entity::find()
            .order_by_desc(announcements::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates an announcement.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        author_id: Uuid,
    ) -> Result<announcements::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let item = announcements::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(title.to_string()),
            content: Set(content.to_string()),
            author_id: Set(author_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        item.insert(&self.db).await
    }

    /// Deletes an announcement. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = announcements::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
