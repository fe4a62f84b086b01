//! Time entry repository.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use coveted_core::reporting::TimeEntryRecord;

use crate::entities::{time_entries, users};

/// Time entry repository for manual entries and clock in/out.
#[derive(Debug, Clone)]
pub struct TimeEntryRepository {
    db: DatabaseConnection,
}

impl TimeEntryRepository {
    /// Creates a new time entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a user's entries, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(&self, user_id: Uuid) -> Result<Vec<time_entries::Model>, DbErr> {
        time_entries::Entity::find()
            .filter(time_entries::Column::UserId.eq(user_id))
            .order_by_desc(time_entries::Column::Date)
            .all(&self.db)
            .await
    }

    /// Finds an entry by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<time_entries::Model>, DbErr> {
        time_entries::Entity::find_by_id(id).one(&self.db).await
    }

    /// Creates a manual entry with pre-computed hours.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_manual(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        hours: Decimal,
        note: &str,
    ) -> Result<time_entries::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let entry = time_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            date: Set(date),
            hours: Set(hours),
            clock_in: Set(None),
            clock_out: Set(None),
            note: Set(note.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        entry.insert(&self.db).await
    }

    /// Opens a clock-in entry (zero hours until clock-out).
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn clock_in(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        stamp: &str,
    ) -> Result<time_entries::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let entry = time_entries::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            date: Set(date),
            hours: Set(Decimal::ZERO),
            clock_in: Set(Some(stamp.to_string())),
            clock_out: Set(None),
            note: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        entry.insert(&self.db).await
    }

    /// Finds the user's active entry (clocked in, not yet out), if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_active(&self, user_id: Uuid) -> Result<Option<time_entries::Model>, DbErr> {
        time_entries::Entity::find()
            .filter(time_entries::Column::UserId.eq(user_id))
            .filter(time_entries::Column::ClockIn.is_not_null())
            .filter(time_entries::Column::ClockOut.is_null())
            .one(&self.db)
            .await
    }

    /// Closes a clock-in entry with the out stamp and computed hours.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn complete_clock_out(
        &self,
        id: Uuid,
        stamp: &str,
        hours: Decimal,
    ) -> Result<Option<time_entries::Model>, DbErr> {
        let Some(entry) = time_entries::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: time_entries::ActiveModel = entry.into();
        active.clock_out = Set(Some(stamp.to_string()));
        active.hours = Set(hours);
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes an entry. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = time_entries::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Hour values a user logged on exactly `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn hours_on(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<Decimal>, DbErr> {
        let rows = time_entries::Entity::find()
            .filter(time_entries::Column::UserId.eq(user_id))
            .filter(time_entries::Column::Date.eq(date))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|e| e.hours).collect())
    }

    /// Hour values a user logged on or after `date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn hours_since(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<Decimal>, DbErr> {
        let rows = time_entries::Entity::find()
            .filter(time_entries::Column::UserId.eq(user_id))
            .filter(time_entries::Column::Date.gte(date))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|e| e.hours).collect())
    }

    /// Entries as report records with hydrated user names.
    ///
    /// `scope` of `None` means org-wide.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn records(&self, scope: Option<Uuid>) -> Result<Vec<TimeEntryRecord>, DbErr> {
        let mut query = time_entries::Entity::find();
        if let Some(user_id) = scope {
            query = query.filter(time_entries::Column::UserId.eq(user_id));
        }
        let rows = query.all(&self.db).await?;

        let user_ids: Vec<Uuid> = rows.iter().map(|e| e.user_id).collect();
        let names: HashMap<Uuid, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(user_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u.name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|e| TimeEntryRecord {
                user_name: names
                    .get(&e.user_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                date: e.date,
                hours: e.hours,
            })
            .collect())
    }
}
