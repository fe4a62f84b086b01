//! Property routes, including nested orders and setup tasks.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::AppState;
use crate::error::{ApiError, ApiResult, require};
use crate::middleware::AuthUser;
use coveted_db::PropertyRepository;
use coveted_db::entities::{
    properties, property_orders, sea_orm_active_enums::OrderStatus, setup_tasks,
};
use coveted_db::repositories::property::{
    CreateOrderInput, CreatePropertyInput, PropertyWithChildren, UpdateOrderInput,
    UpdatePropertyInput,
};

/// Creates the properties router (auth middleware applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/properties", get(list).post(create))
        .route("/properties/{id}", get(find).patch(update).delete(remove))
        .route("/properties/{id}/orders", post(create_order))
        .route(
            "/properties/{id}/orders/{order_id}",
            patch(update_order).delete(remove_order),
        )
        .route("/properties/{id}/tasks", post(create_setup_task))
        .route(
            "/properties/{id}/tasks/{task_id}",
            patch(toggle_setup_task).delete(remove_setup_task),
        )
}

/// Create payload.
#[derive(Debug, Deserialize)]
struct CreateRequest {
    name: Option<String>,
    address: Option<String>,
    #[serde(rename = "type")]
    property_type: Option<String>,
    status: Option<String>,
    units: Option<i32>,
    beds: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    baths: Option<Decimal>,
    notes: Option<String>,
}

/// Patch payload.
#[derive(Debug, Deserialize, Default)]
struct PatchRequest {
    name: Option<String>,
    address: Option<String>,
    #[serde(rename = "type")]
    property_type: Option<String>,
    status: Option<String>,
    units: Option<i32>,
    beds: Option<i32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    baths: Option<Decimal>,
    notes: Option<String>,
}

/// Order create payload.
#[derive(Debug, Deserialize)]
struct OrderRequest {
    title: Option<String>,
    #[serde(rename = "type")]
    order_type: Option<String>,
    vendor: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    cost: Option<Decimal>,
    status: Option<OrderStatus>,
    notes: Option<String>,
}

/// Order patch payload.
#[derive(Debug, Deserialize, Default)]
struct OrderPatchRequest {
    title: Option<String>,
    #[serde(rename = "type")]
    order_type: Option<String>,
    vendor: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    cost: Option<Decimal>,
    status: Option<OrderStatus>,
    notes: Option<String>,
}

/// Setup task create payload.
#[derive(Debug, Deserialize)]
struct SetupTaskRequest {
    title: Option<String>,
}

/// Setup task toggle payload.
#[derive(Debug, Deserialize)]
struct SetupTaskToggleRequest {
    done: Option<bool>,
}

/// Property response bundling orders and setup tasks, mirroring the
/// stored rows plus the children the UI renders inline.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyResponse {
    #[serde(flatten)]
    property: properties::Model,
    orders: Vec<property_orders::Model>,
    setup_tasks: Vec<setup_tasks::Model>,
}

impl From<PropertyWithChildren> for PropertyResponse {
    fn from(bundle: PropertyWithChildren) -> Self {
        Self {
            property: bundle.property,
            orders: bundle.orders,
            setup_tasks: bundle.setup_tasks,
        }
    }
}

/// GET /properties - all properties with children, newest first.
async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<PropertyResponse>>> {
    let repo = PropertyRepository::new((*state.db).clone());
    let bundles = repo.list_with_children().await?;
    Ok(Json(bundles.into_iter().map(Into::into).collect()))
}

/// GET /properties/{id}.
async fn find(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PropertyResponse>> {
    let repo = PropertyRepository::new((*state.db).clone());
    let bundle = repo
        .find_with_children(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;
    Ok(Json(bundle.into()))
}

/// POST /properties.
async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(payload): Json<CreateRequest>,
) -> ApiResult<(StatusCode, Json<properties::Model>)> {
    let name = require(payload.name, "Name is required")?;

    let repo = PropertyRepository::new((*state.db).clone());
    let property = repo
        .create(CreatePropertyInput {
            name,
            address: payload.address.unwrap_or_default(),
            property_type: payload
                .property_type
                .unwrap_or_else(|| "short-term".to_string()),
            status: payload.status.unwrap_or_else(|| "setup".to_string()),
            units: payload.units.unwrap_or(1),
            beds: payload.beds.unwrap_or(0),
            baths: payload.baths.unwrap_or(Decimal::ZERO),
            notes: payload.notes.unwrap_or_default(),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(property)))
}

/// PATCH /properties/{id}.
async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatchRequest>,
) -> ApiResult<Json<properties::Model>> {
    let repo = PropertyRepository::new((*state.db).clone());
    let property = repo
        .update(
            id,
            UpdatePropertyInput {
                name: payload.name,
                address: payload.address,
                property_type: payload.property_type,
                status: payload.status,
                units: payload.units,
                beds: payload.beds,
                baths: payload.baths,
                notes: payload.notes,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;
    Ok(Json(property))
}

/// DELETE /properties/{id} - expenses/revenues keep their loose reference.
async fn remove(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = PropertyRepository::new((*state.db).clone());
    if !repo.delete(id).await? {
        return Err(ApiError::not_found("Property not found"));
    }
    Ok(Json(json!({ "success": true })))
}

/// POST /properties/{id}/orders.
async fn create_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<OrderRequest>,
) -> ApiResult<(StatusCode, Json<property_orders::Model>)> {
    let title = require(payload.title, "Title is required")?;

    let repo = PropertyRepository::new((*state.db).clone());
    let order = repo
        .create_order(
            id,
            CreateOrderInput {
                title,
                order_type: payload
                    .order_type
                    .unwrap_or_else(|| "furniture".to_string()),
                vendor: payload.vendor.unwrap_or_default(),
                cost: payload.cost.unwrap_or(Decimal::ZERO),
                status: payload.status.unwrap_or(OrderStatus::Pending),
                notes: payload.notes.unwrap_or_default(),
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// PATCH /properties/{id}/orders/{order_id}.
async fn update_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((_id, order_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<OrderPatchRequest>,
) -> ApiResult<Json<property_orders::Model>> {
    let repo = PropertyRepository::new((*state.db).clone());
    let order = repo
        .update_order(
            order_id,
            UpdateOrderInput {
                title: payload.title,
                order_type: payload.order_type,
                vendor: payload.vendor,
                cost: payload.cost,
                status: payload.status,
                notes: payload.notes,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;
    Ok(Json(order))
}

/// DELETE /properties/{id}/orders/{order_id}.
async fn remove_order(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((_id, order_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = PropertyRepository::new((*state.db).clone());
    if !repo.delete_order(order_id).await? {
        return Err(ApiError::not_found("Order not found"));
    }
    Ok(Json(json!({ "success": true })))
}

/// POST /properties/{id}/tasks - add a setup checklist item.
async fn create_setup_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetupTaskRequest>,
) -> ApiResult<(StatusCode, Json<setup_tasks::Model>)> {
    let title = require(payload.title, "Title is required")?;

    let repo = PropertyRepository::new((*state.db).clone());
    let task = repo.create_setup_task(id, &title).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PATCH /properties/{id}/tasks/{task_id} - toggle done.
async fn toggle_setup_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<SetupTaskToggleRequest>,
) -> ApiResult<Json<setup_tasks::Model>> {
    let repo = PropertyRepository::new((*state.db).clone());
    let task = repo
        .set_setup_task_done(task_id, payload.done.unwrap_or(false))
        .await?
        .ok_or_else(|| ApiError::not_found("Setup task not found"))?;
    Ok(Json(task))
}

/// DELETE /properties/{id}/tasks/{task_id}.
async fn remove_setup_task(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((_id, task_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<serde_json::Value>> {
    let repo = PropertyRepository::new((*state.db).clone());
    if !repo.delete_setup_task(task_id).await? {
        return Err(ApiError::not_found("Setup task not found"));
    }
    Ok(Json(json!({ "success": true })))
}
