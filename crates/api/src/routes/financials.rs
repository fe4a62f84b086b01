//! Financial routes: expense/revenue ledgers and the aggregation endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
};
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_core::finance::{
    DateRange, FinancialSummary, PortfolioSummary, build_portfolio_summary,
};
use coveted_core::reporting::{EmployeePerformance, employee_performance};
use coveted_db::entities::{
    expenses, revenues,
    sea_orm_active_enums::{ExpenseCategory, RevenueCategory},
};
use coveted_db::repositories::finance::{CreateExpenseInput, CreateRevenueInput};
use coveted_db::{FinanceRepository, PropertyRepository, TaskRepository, UserRepository};
use coveted_shared::types::NamedRef;

/// Creates the financials router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/financials/expenses", get(list_expenses).post(create_expense))
        .route("/financials/expenses/{id}", delete(remove_expense))
        .route("/financials/revenue", get(list_revenues).post(create_revenue))
        .route("/financials/revenue/{id}", delete(remove_revenue))
        .route("/financials/summary", get(summary))
        .route("/financials/portfolio", get(portfolio))
        .route("/financials/employee-performance", get(performance))
}

/// Optional inclusive date bounds shared by the aggregation endpoints.
#[derive(Debug, Deserialize)]
struct RangeQuery {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl RangeQuery {
    fn range(&self) -> DateRange {
        DateRange::new(self.start, self.end)
    }
}

/// Expense create payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseRequest {
    title: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    amount: Option<Decimal>,
    category: Option<ExpenseCategory>,
    date: Option<NaiveDate>,
    property_id: Option<Uuid>,
    notes: Option<String>,
}

/// Revenue create payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RevenueRequest {
    title: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    amount: Option<Decimal>,
    category: Option<RevenueCategory>,
    date: Option<NaiveDate>,
    property_id: Option<Uuid>,
    notes: Option<String>,
}

/// Expense response with hydrated submitter and property.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseResponse {
    id: Uuid,
    title: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: ExpenseCategory,
    date: NaiveDate,
    property_id: Option<Uuid>,
    notes: String,
    submitted_by: Option<NamedRef>,
    property: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

/// Revenue response with hydrated property.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RevenueResponse {
    id: Uuid,
    title: String,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    category: RevenueCategory,
    date: NaiveDate,
    property_id: Option<Uuid>,
    notes: String,
    property: Option<NamedRef>,
    created_at: DateTime<FixedOffset>,
}

fn expense_response(
    item: expenses::Model,
    user_names: &std::collections::HashMap<Uuid, String>,
    property_names: &std::collections::HashMap<Uuid, String>,
) -> ExpenseResponse {
    ExpenseResponse {
        id: item.id,
        title: item.title,
        amount: item.amount,
        category: item.category,
        date: item.date,
        property_id: item.property_id,
        notes: item.notes,
        submitted_by: user_names
            .get(&item.submitted_by_id)
            .map(|n| NamedRef::new(item.submitted_by_id, n.clone())),
        property: item.property_id.and_then(|id| {
            property_names
                .get(&id)
                .map(|n| NamedRef::new(id, n.clone()))
        }),
        created_at: item.created_at,
    }
}

fn revenue_response(
    item: revenues::Model,
    property_names: &std::collections::HashMap<Uuid, String>,
) -> RevenueResponse {
    RevenueResponse {
        id: item.id,
        title: item.title,
        amount: item.amount,
        category: item.category,
        date: item.date,
        property_id: item.property_id,
        notes: item.notes,
        property: item.property_id.and_then(|id| {
            property_names
                .get(&id)
                .map(|n| NamedRef::new(id, n.clone()))
        }),
        created_at: item.created_at,
    }
}

// ============================================================================
// Expenses
// ============================================================================

/// GET /financials/expenses.
async fn list_expenses(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    let finance = FinanceRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());
    let properties = PropertyRepository::new((*state.db).clone());

    let items = finance.list_expenses().await?;
    let user_ids: Vec<Uuid> = items.iter().map(|e| e.submitted_by_id).collect();
    let property_ids: Vec<Uuid> = items.iter().filter_map(|e| e.property_id).collect();
    let (user_names, property_names) = tokio::try_join!(
        users.name_map(&user_ids),
        properties.name_map(&property_ids)
    )?;

    Ok(Json(
        items
            .into_iter()
            .map(|e| expense_response(e, &user_names, &property_names))
            .collect(),
    ))
}

/// POST /financials/expenses.
async fn create_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<ExpenseRequest>,
) -> ApiResult<(StatusCode, Json<ExpenseResponse>)> {
    let title = require(payload.title, "Title, amount, and date are required")?;
    let (Some(amount), Some(date)) = (payload.amount, payload.date) else {
        return Err(ApiError::validation("Title, amount, and date are required"));
    };
    if amount.is_sign_negative() {
        return Err(ApiError::validation("amount must be non-negative"));
    }

    let finance = FinanceRepository::new((*state.db).clone());
    let users = UserRepository::new((*state.db).clone());
    let properties = PropertyRepository::new((*state.db).clone());

    let item = finance
        .create_expense(CreateExpenseInput {
            title,
            amount,
            category: payload.category.unwrap_or(ExpenseCategory::Other),
            date,
            property_id: payload.property_id,
            submitted_by_id: auth.user_id(),
            notes: payload.notes.unwrap_or_default(),
        })
        .await?;

    let property_ids: Vec<Uuid> = item.property_id.into_iter().collect();
    let submitter_ids = [item.submitted_by_id];
    let (user_names, property_names) = tokio::try_join!(
        users.name_map(&submitter_ids),
        properties.name_map(&property_ids)
    )?;

    Ok((
        StatusCode::CREATED,
        Json(expense_response(item, &user_names, &property_names)),
    ))
}

/// DELETE /financials/expenses/{id}.
async fn remove_expense(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let finance = FinanceRepository::new((*state.db).clone());
    if !finance.delete_expense(id).await? {
        return Err(ApiError::not_found("Expense not found"));
    }
    Ok(Json(json!({ "success": true })))
}

// ============================================================================
// Revenue
// ============================================================================

/// GET /financials/revenue.
async fn list_revenues(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<RevenueResponse>>> {
    let finance = FinanceRepository::new((*state.db).clone());
    let properties = PropertyRepository::new((*state.db).clone());

    let items = finance.list_revenues().await?;
    let property_ids: Vec<Uuid> = items.iter().filter_map(|r| r.property_id).collect();
    let property_names = properties.name_map(&property_ids).await?;

    Ok(Json(
        items
            .into_iter()
            .map(|r| revenue_response(r, &property_names))
            .collect(),
    ))
}

/// POST /financials/revenue.
async fn create_revenue(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<RevenueRequest>,
) -> ApiResult<(StatusCode, Json<RevenueResponse>)> {
    let title = require(payload.title, "Title, amount, and date are required")?;
    let (Some(amount), Some(date)) = (payload.amount, payload.date) else {
        return Err(ApiError::validation("Title, amount, and date are required"));
    };
    if amount.is_sign_negative() {
        return Err(ApiError::validation("amount must be non-negative"));
    }

    let finance = FinanceRepository::new((*state.db).clone());
    let properties = PropertyRepository::new((*state.db).clone());

    let item = finance
        .create_revenue(CreateRevenueInput {
            title,
            amount,
            category: payload.category.unwrap_or(RevenueCategory::Booking),
            date,
            property_id: payload.property_id,
            notes: payload.notes.unwrap_or_default(),
        })
        .await?;

    let property_ids: Vec<Uuid> = item.property_id.into_iter().collect();
    let property_names = properties.name_map(&property_ids).await?;

    Ok((
        StatusCode::CREATED,
        Json(revenue_response(item, &property_names)),
    ))
}

/// DELETE /financials/revenue/{id}.
async fn remove_revenue(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let finance = FinanceRepository::new((*state.db).clone());
    if !finance.delete_revenue(id).await? {
        return Err(ApiError::not_found("Revenue not found"));
    }
    Ok(Json(json!({ "success": true })))
}

// ============================================================================
// Aggregations
// ============================================================================

/// GET /financials/summary - flat all-time totals.
async fn summary(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<FinancialSummary>> {
    let finance = FinanceRepository::new((*state.db).clone());

    let (expense_rows, revenue_rows) = tokio::try_join!(
        finance.expense_records(DateRange::default()),
        finance.revenue_records(DateRange::default())
    )?;

    let total_expenses: Decimal = expense_rows.iter().map(|e| e.amount).sum();
    let total_revenue: Decimal = revenue_rows.iter().map(|r| r.amount).sum();

    Ok(Json(FinancialSummary {
        total_expenses,
        total_revenue,
        net_income: total_revenue - total_expenses,
        expense_count: expense_rows.len() as u64,
        revenue_count: revenue_rows.len() as u64,
    }))
}

/// GET /financials/portfolio?start=&end= - portfolio-wide rollup.
///
/// The three reads are independent, so they are fanned out and joined.
async fn portfolio(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<PortfolioSummary>> {
    let finance = FinanceRepository::new((*state.db).clone());
    let properties = PropertyRepository::new((*state.db).clone());
    let range = query.range();

    let (property_refs, expense_rows, revenue_rows) = tokio::try_join!(
        properties.refs(),
        finance.expense_records(range),
        finance.revenue_records(range)
    )?;

    Ok(Json(build_portfolio_summary(
        &property_refs,
        &expense_rows,
        &revenue_rows,
    )))
}

/// GET /financials/employee-performance?start=&end= - completion rates.
async fn performance(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RangeQuery>,
) -> ApiResult<Json<Vec<EmployeePerformance>>> {
    let users = UserRepository::new((*state.db).clone());
    let tasks = TaskRepository::new((*state.db).clone());

    let (user_rows, task_rows) = tokio::try_join!(
        users.records(),
        tasks.records_created_in(query.range())
    )?;

    Ok(Json(employee_performance(&user_rows, &task_rows)))
}
