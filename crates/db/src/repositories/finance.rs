//! Expense/revenue repository and portfolio query helpers.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use coveted_core::finance::{DateRange, TransactionRecord};

use crate::entities::{
    expenses, revenues,
    sea_orm_active_enums::{ExpenseCategory, RevenueCategory},
};

/// Fields for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    /// Expense title.
    pub title: String,
    /// Amount (non-negative).
    pub amount: Decimal,
    /// Category, defaults to other upstream.
    pub category: ExpenseCategory,
    /// Calendar date.
    pub date: NaiveDate,
    /// Loose property reference.
    pub property_id: Option<Uuid>,
    /// Submitting user.
    pub submitted_by_id: Uuid,
    /// Free-form notes.
    pub notes: String,
}

/// Fields for creating a revenue row.
#[derive(Debug, Clone)]
pub struct CreateRevenueInput {
    /// Revenue title.
    pub title: String,
    /// Amount (non-negative).
    pub amount: Decimal,
    /// Category, defaults to booking upstream.
    pub category: RevenueCategory,
    /// Calendar date.
    pub date: NaiveDate,
    /// Loose property reference.
    pub property_id: Option<Uuid>,
    /// Free-form notes.
    pub notes: String,
}

/// Financial ledger repository.
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    db: DatabaseConnection,
}

impl FinanceRepository {
    /// Creates a new finance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Expenses
    // ========================================================================

    /// Lists expenses, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_expenses(&self) -> Result<Vec<expenses::Model>, DbErr> {
        expenses::Entity::find()
            .order_by_desc(expenses::Column::Date)
            .all(&self.db)
            .await
    }

    /// Records an expense.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_expense(&self, input: CreateExpenseInput) -> Result<expenses::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let expense = expenses::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            amount: Set(input.amount),
            category: Set(input.category),
            date: Set(input.date),
            property_id: Set(input.property_id),
            submitted_by_id: Set(input.submitted_by_id),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        expense.insert(&self.db).await
    }

    /// Deletes an expense. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_expense(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = expenses::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Revenues
    // ========================================================================

    /// Lists revenues, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_revenues(&self) -> Result<Vec<revenues::Model>, DbErr> {
        revenues::Entity::find()
            .order_by_desc(revenues::Column::Date)
            .all(&self.db)
            .await
    }

    /// Records a revenue row.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_revenue(&self, input: CreateRevenueInput) -> Result<revenues::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let revenue = revenues::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title),
            amount: Set(input.amount),
            category: Set(input.category),
            date: Set(input.date),
            property_id: Set(input.property_id),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        revenue.insert(&self.db).await
    }

    /// Deletes a revenue row. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_revenue(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = revenues::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Aggregation feeds
    // ========================================================================

    /// Expense rows within the range as aggregation records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn expense_records(&self, range: DateRange) -> Result<Vec<TransactionRecord>, DbErr> {
        let mut query = expenses::Entity::find();
        if let Some(start) = range.start {
            query = query.filter(expenses::Column::Date.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(expenses::Column::Date.lte(end));
        }
        let rows = query.all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|e| TransactionRecord {
                amount: e.amount,
                category: e.category.to_value(),
                date: e.date,
                property_id: e.property_id,
            })
            .collect())
    }

    /// Revenue rows within the range as aggregation records.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revenue_records(&self, range: DateRange) -> Result<Vec<TransactionRecord>, DbErr> {
        let mut query = revenues::Entity::find();
        if let Some(start) = range.start {
            query = query.filter(revenues::Column::Date.gte(start));
        }
        if let Some(end) = range.end {
            query = query.filter(revenues::Column::Date.lte(end));
        }
        let rows = query.all(&self.db).await?;
        Ok(rows
            .into_iter()
            .map(|r| TransactionRecord {
                amount: r.amount,
                category: r.category.to_value(),
                date: r.date,
                property_id: r.property_id,
            })
            .collect())
    }
}
