//! Message repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::messages;

/// Message repository for CRUD and unread counts.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    db: DatabaseConnection,
}

impl MessageRepository {
    /// Creates a new message repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists messages the user sent or received, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(&self, user_id: Uuid) -> Result<Vec<messages::Model>, DbErr> {
        messages::Entity::find()
            .filter(
                Condition::any()
                    .add(messages::Column::SenderId.eq(user_id))
                    .add(messages::Column::ReceiverId.eq(user_id)),
            )
            .order_by_desc(messages::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Sends a message.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        subject: &str,
        content: &str,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<messages::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let item = messages::ActiveModel {
            id: Set(Uuid::new_v4()),
            subject: Set(subject.to_string()),
            content: Set(content.to_string()),
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            read: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        item.insert(&self.db).await
    }

    /// Marks a message as read. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn mark_read(&self, id: Uuid) -> Result<Option<messages::Model>, DbErr> {
        let Some(message) = messages::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: messages::ActiveModel = message.into();
        active.read = Set(true);
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a message. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = messages::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Counts unread messages for a receiver.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_unread(&self, receiver_id: Uuid) -> Result<u64, DbErr> {
        messages::Entity::find()
            .filter(messages::Column::ReceiverId.eq(receiver_id))
            .filter(messages::Column::Read.eq(false))
            .count(&self.db)
            .await
    }
}
