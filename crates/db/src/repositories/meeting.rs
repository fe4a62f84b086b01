//! Meeting repository.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::meetings;

/// Fields for creating a meeting.
#[derive(Debug, Clone)]
pub struct CreateMeetingInput {
    /// Meeting title.
    pub title: String,
    /// Meeting date.
    pub date: NaiveDate,
    /// Optional `HH:MM` start time.
    pub time: Option<String>,
    /// Video call link.
    pub video_link: String,
    /// Free-form notes.
    pub notes: String,
    /// Attendee user ids.
    pub attendee_ids: Vec<Uuid>,
    /// Creating user.
    pub created_by_id: Uuid,
}

/// Partial update for a meeting.
#[derive(Debug, Clone, Default)]
pub struct UpdateMeetingInput {
    /// New title.
    pub title: Option<String>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New start time.
    pub time: Option<Option<String>>,
    /// New video link.
    pub video_link: Option<String>,
    /// New notes.
    pub notes: Option<String>,
    /// New attendee list.
    pub attendee_ids: Option<Vec<Uuid>>,
}

/// Meeting repository.
#[derive(Debug, Clone)]
pub struct MeetingRepository {
    db: DatabaseConnection,
}

impl MeetingRepository {
    /// Creates a new meeting repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists meetings in date order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<meetings::Model>, DbErr> {
        meetings::Entity::find()
            .order_by_asc(meetings::Column::Date)
            .all(&self.db)
            .await
    }

    /// Creates a meeting.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateMeetingInput) -> Result<meetings::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let meeting = meetings::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            date: Set(input.date),
            time: Set(input.time),
            video_link: Set(input.video_link),
            notes: Set(input.notes),
            attendee_ids: Set(serde_json::json!(input.attendee_ids)),
            created_by_id: Set(input.created_by_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        meeting.insert(&self.db).await
    }

    /// Applies a partial update. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateMeetingInput,
    ) -> Result<Option<meetings::Model>, DbErr> {
        let Some(meeting) = meetings::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: meetings::ActiveModel = meeting.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(date) = input.date {
            active.date = Set(date);
        }
        if let Some(time) = input.time {
            active.time = Set(time);
        }
        if let Some(video_link) = input.video_link {
            active.video_link = Set(video_link);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        if let Some(attendee_ids) = input.attendee_ids {
            active.attendee_ids = Set(serde_json::json!(attendee_ids));
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a meeting. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = meetings::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

/// Decodes the attendee id JSON array, skipping malformed entries.
#[must_use]
pub fn attendee_ids(meeting: &meetings::Model) -> Vec<Uuid> {
    meeting
        .attendee_ids
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().and_then(|s| s.parse().ok()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn meeting_with_attendees(attendee_ids: serde_json::Value) -> meetings::Model {
        let now = chrono::Utc::now().into();
        meetings::Model {
            id: Uuid::new_v4(),
            title: "Weekly sync".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            time: Some("09:30".to_string()),
            video_link: String::new(),
            notes: String::new(),
            attendee_ids,
            created_by_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_attendee_ids_decodes_uuids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let meeting = meeting_with_attendees(serde_json::json!([a, b]));
        assert_eq!(attendee_ids(&meeting), vec![a, b]);
    }

    #[rstest]
    #[case(serde_json::json!(null))]
    #[case(serde_json::json!({}))]
    #[case(serde_json::json!(["not-a-uuid", 42]))]
    fn test_attendee_ids_tolerates_garbage(#[case] raw: serde_json::Value) {
        let meeting = meeting_with_attendees(raw);
        assert!(attendee_ids(&meeting).is_empty());
    }
}
