//! Task repository.

use chrono::{NaiveDate, NaiveTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use coveted_core::finance::DateRange;
use coveted_core::reporting::TaskRecord;

use crate::entities::{
    sea_orm_active_enums::{TaskPriority, TaskStatus},
    tasks,
};

/// Fields for creating a task.
#[derive(Debug, Clone)]
pub struct CreateTaskInput {
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Priority, defaults to medium upstream.
    pub priority: TaskPriority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Assigned user.
    pub assignee_id: Uuid,
    /// Creating user.
    pub creator_id: Uuid,
}

/// Partial update for a task; unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskInput {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status.
    pub status: Option<TaskStatus>,
    /// New priority.
    pub priority: Option<TaskPriority>,
    /// New due date.
    pub due_date: Option<NaiveDate>,
    /// New assignee.
    pub assignee_id: Option<Uuid>,
}

/// Task repository.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    db: DatabaseConnection,
}

impl TaskRepository {
    /// Creates a new task repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Condition matching tasks the user is assigned to or created.
    fn involves(user_id: Uuid) -> Condition {
        Condition::any()
            .add(tasks::Column::AssigneeId.eq(user_id))
            .add(tasks::Column::CreatorId.eq(user_id))
    }

    /// Lists tasks the user is assigned to or created, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for(&self, user_id: Uuid) -> Result<Vec<tasks::Model>, DbErr> {
        tasks::Entity::find()
            .filter(Self::involves(user_id))
            .order_by_desc(tasks::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateTaskInput) -> Result<tasks::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let task = tasks::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            description: Set(input.description),
            status: Set(TaskStatus::Todo),
            priority: Set(input.priority),
            due_date: Set(input.due_date),
            assignee_id: Set(input.assignee_id),
            creator_id: Set(input.creator_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        task.insert(&self.db).await
    }

    /// Applies a partial update. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdateTaskInput,
    ) -> Result<Option<tasks::Model>, DbErr> {
        let Some(task) = tasks::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: tasks::ActiveModel = task.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(priority) = input.priority {
            active.priority = Set(priority);
        }
        if let Some(due_date) = input.due_date {
            active.due_date = Set(Some(due_date));
        }
        if let Some(assignee_id) = input.assignee_id {
            active.assignee_id = Set(assignee_id);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a task. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = tasks::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Counts the user's open (not done) tasks.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_open(&self, assignee_id: Uuid) -> Result<u64, DbErr> {
        tasks::Entity::find()
            .filter(tasks::Column::AssigneeId.eq(assignee_id))
            .filter(tasks::Column::Status.ne(TaskStatus::Done))
            .count(&self.db)
            .await
    }

    /// Counts the user's open tasks due before `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_overdue(&self, assignee_id: Uuid, today: NaiveDate) -> Result<u64, DbErr> {
        tasks::Entity::find()
            .filter(tasks::Column::AssigneeId.eq(assignee_id))
            .filter(tasks::Column::Status.ne(TaskStatus::Done))
            .filter(tasks::Column::DueDate.lt(today))
            .count(&self.db)
            .await
    }

    /// Tasks as report records; scope of `None` means org-wide, otherwise
    /// tasks the user is assigned to or created.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn records(&self, scope: Option<Uuid>) -> Result<Vec<TaskRecord>, DbErr> {
        let mut query = tasks::Entity::find();
        if let Some(user_id) = scope {
            query = query.filter(Self::involves(user_id));
        }
        let rows = query.all(&self.db).await?;
        Ok(rows.into_iter().map(to_record).collect())
    }

    /// Tasks created within the (optional) range, for performance reporting.
    ///
    /// Bounds apply to `created_at`: a `start` date includes tasks created
    /// from its midnight, an `end` date includes the whole end day.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn records_created_in(&self, range: DateRange) -> Result<Vec<TaskRecord>, DbErr> {
        let mut query = tasks::Entity::find();
        if let Some(start) = range.start {
            let from = start.and_time(NaiveTime::MIN).and_utc();
            query = query.filter(tasks::Column::CreatedAt.gte(from));
        }
        if let Some(end) = range.end {
            // Inclusive end day: strictly before the next midnight.
            if let Some(next_day) = end.succ_opt() {
                let until = next_day.and_time(NaiveTime::MIN).and_utc();
                query = query.filter(tasks::Column::CreatedAt.lt(until));
            }
        }
        let rows = query.all(&self.db).await?;
        Ok(rows.into_iter().map(to_record).collect())
    }
}

fn to_record(task: tasks::Model) -> TaskRecord {
    TaskRecord {
        assignee_id: task.assignee_id,
        status: task.status.into(),
        priority: task.priority.into(),
        due_date: task.due_date,
    }
}
