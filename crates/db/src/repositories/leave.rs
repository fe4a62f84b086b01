//! Leave request repository.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use coveted_core::reporting::LeaveRecord;

use crate::entities::{leave_requests, sea_orm_active_enums::LeaveStatus};

/// Leave request repository.
///
/// List/count methods take an optional user scope: `None` means org-wide
/// (privileged callers), `Some(id)` restricts to that user's requests.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists leave requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, scope: Option<Uuid>) -> Result<Vec<leave_requests::Model>, DbErr> {
        let mut query = leave_requests::Entity::find();
        if let Some(user_id) = scope {
            query = query.filter(leave_requests::Column::UserId.eq(user_id));
        }
        query
            .order_by_desc(leave_requests::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Files a new leave request (status starts pending).
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(
        &self,
        user_id: Uuid,
        leave_type: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
    ) -> Result<leave_requests::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let item = leave_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            leave_type: Set(leave_type.to_string()),
            start_date: Set(start_date),
            end_date: Set(end_date),
            reason: Set(reason.to_string()),
            status: Set(LeaveStatus::Pending),
            reviewer_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        item.insert(&self.db).await
    }

    /// Records a reviewer decision. Returns `None` when the id does not
    /// exist. Last write wins on concurrent reviews.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn review(
        &self,
        id: Uuid,
        status: LeaveStatus,
        reviewer_id: Uuid,
    ) -> Result<Option<leave_requests::Model>, DbErr> {
        let Some(request) = leave_requests::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: leave_requests::ActiveModel = request.into();
        active.status = Set(status);
        active.reviewer_id = Set(Some(reviewer_id));
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Counts pending requests, optionally scoped to one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_pending(&self, scope: Option<Uuid>) -> Result<u64, DbErr> {
        let mut query = leave_requests::Entity::find()
            .filter(leave_requests::Column::Status.eq(LeaveStatus::Pending));
        if let Some(user_id) = scope {
            query = query.filter(leave_requests::Column::UserId.eq(user_id));
        }
        query.count(&self.db).await
    }

    /// Leave rows as report records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn records(&self, scope: Option<Uuid>) -> Result<Vec<LeaveRecord>, DbErr> {
        let rows = self.list(scope).await?;
        Ok(rows
            .into_iter()
            .map(|r| LeaveRecord {
                status: r.status.into(),
                leave_type: r.leave_type,
            })
            .collect())
    }
}
