//! Property repository covering properties, their orders, and setup tasks.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use coveted_core::finance::PropertyRef;

use crate::entities::{
    properties, property_orders, sea_orm_active_enums::OrderStatus, setup_tasks,
};

/// A property bundled with its orders and setup tasks.
#[derive(Debug, Clone)]
pub struct PropertyWithChildren {
    /// The property row.
    pub property: properties::Model,
    /// Orders placed for this property.
    pub orders: Vec<property_orders::Model>,
    /// Setup checklist items.
    pub setup_tasks: Vec<setup_tasks::Model>,
}

/// Fields for creating a property.
#[derive(Debug, Clone)]
pub struct CreatePropertyInput {
    /// Property name.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Rental type, e.g. "short-term".
    pub property_type: String,
    /// Lifecycle status, e.g. "setup".
    pub status: String,
    /// Unit count.
    pub units: i32,
    /// Bed count.
    pub beds: i32,
    /// Bath count (halves allowed).
    pub baths: Decimal,
    /// Free-form notes.
    pub notes: String,
}

/// Partial update for a property.
#[derive(Debug, Clone, Default)]
pub struct UpdatePropertyInput {
    /// New name.
    pub name: Option<String>,
    /// New address.
    pub address: Option<String>,
    /// New rental type.
    pub property_type: Option<String>,
    /// New status.
    pub status: Option<String>,
    /// New unit count.
    pub units: Option<i32>,
    /// New bed count.
    pub beds: Option<i32>,
    /// New bath count.
    pub baths: Option<Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// Fields for creating a property order.
#[derive(Debug, Clone)]
pub struct CreateOrderInput {
    /// Order title.
    pub title: String,
    /// Order type, e.g. "furniture".
    pub order_type: String,
    /// Vendor name.
    pub vendor: String,
    /// Order cost.
    pub cost: Decimal,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// Free-form notes.
    pub notes: String,
}

/// Partial update for a property order.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderInput {
    /// New title.
    pub title: Option<String>,
    /// New order type.
    pub order_type: Option<String>,
    /// New vendor.
    pub vendor: Option<String>,
    /// New cost.
    pub cost: Option<Decimal>,
    /// New status.
    pub status: Option<OrderStatus>,
    /// New notes.
    pub notes: Option<String>,
}

/// Property repository.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ========================================================================
    // Properties
    // ========================================================================

    /// Lists properties with their orders and setup tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn list_with_children(&self) -> Result<Vec<PropertyWithChildren>, DbErr> {
        let rows = properties::Entity::find()
            .order_by_desc(properties::Column::CreatedAt)
            .all(&self.db)
            .await?;
        let ids: Vec<Uuid> = rows.iter().map(|p| p.id).collect();

        let orders = if ids.is_empty() {
            Vec::new()
        } else {
            property_orders::Entity::find()
                .filter(property_orders::Column::PropertyId.is_in(ids.clone()))
                .order_by_desc(property_orders::Column::CreatedAt)
                .all(&self.db)
                .await?
        };
        let setup = if ids.is_empty() {
            Vec::new()
        } else {
            setup_tasks::Entity::find()
                .filter(setup_tasks::Column::PropertyId.is_in(ids))
                .order_by_asc(setup_tasks::Column::CreatedAt)
                .all(&self.db)
                .await?
        };

        let mut orders_by_property: std::collections::HashMap<Uuid, Vec<property_orders::Model>> =
            std::collections::HashMap::new();
        for order in orders {
            orders_by_property
                .entry(order.property_id)
                .or_default()
                .push(order);
        }
        let mut setup_by_property: std::collections::HashMap<Uuid, Vec<setup_tasks::Model>> =
            std::collections::HashMap::new();
        for task in setup {
            setup_by_property
                .entry(task.property_id)
                .or_default()
                .push(task);
        }

        Ok(rows
            .into_iter()
            .map(|property| {
                let orders = orders_by_property.remove(&property.id).unwrap_or_default();
                let setup_tasks = setup_by_property.remove(&property.id).unwrap_or_default();
                PropertyWithChildren {
                    property,
                    orders,
                    setup_tasks,
                }
            })
            .collect())
    }

    /// Fetches one property with children. Returns `None` when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if any database query fails.
    pub async fn find_with_children(
        &self,
        id: Uuid,
    ) -> Result<Option<PropertyWithChildren>, DbErr> {
        let Some(property) = properties::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let orders = property_orders::Entity::find()
            .filter(property_orders::Column::PropertyId.eq(id))
            .order_by_desc(property_orders::Column::CreatedAt)
            .all(&self.db)
            .await?;
        let setup = setup_tasks::Entity::find()
            .filter(setup_tasks::Column::PropertyId.eq(id))
            .order_by_asc(setup_tasks::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(Some(PropertyWithChildren {
            property,
            orders,
            setup_tasks: setup,
        }))
    }

    /// Creates a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreatePropertyInput) -> Result<properties::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let property = properties::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            address: Set(input.address),
            property_type: Set(input.property_type),
            status: Set(input.status),
            units: Set(input.units),
            beds: Set(input.beds),
            baths: Set(input.baths),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        property.insert(&self.db).await
    }

    /// Applies a partial update. Returns `None` when the id does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        id: Uuid,
        input: UpdatePropertyInput,
    ) -> Result<Option<properties::Model>, DbErr> {
        let Some(property) = properties::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: properties::ActiveModel = property.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(address) = input.address {
            active.address = Set(address);
        }
        if let Some(property_type) = input.property_type {
            active.property_type = Set(property_type);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(units) = input.units {
            active.units = Set(units);
        }
        if let Some(beds) = input.beds {
            active.beds = Set(beds);
        }
        if let Some(baths) = input.baths {
            active.baths = Set(baths);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a property. Expenses/revenues referencing it are left in
    /// place (loose references, no cascade).
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = properties::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }

    /// Counts all properties.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<u64, DbErr> {
        properties::Entity::find().count(&self.db).await
    }

    /// Property `(id, name)` refs in name order, for portfolio breakdowns.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn refs(&self) -> Result<Vec<PropertyRef>, DbErr> {
        let rows = properties::Entity::find()
            .order_by_asc(properties::Column::Name)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|p| PropertyRef {
                id: p.id,
                name: p.name,
            })
            .collect())
    }

    /// Maps property ids to names for response hydration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn name_map(
        &self,
        ids: &[Uuid],
    ) -> Result<std::collections::HashMap<Uuid, String>, DbErr> {
        if ids.is_empty() {
            return Ok(std::collections::HashMap::new());
        }
        let rows = properties::Entity::find()
            .filter(properties::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|p| (p.id, p.name)).collect())
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Creates an order for a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_order(
        &self,
        property_id: Uuid,
        input: CreateOrderInput,
    ) -> Result<property_orders::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let order = property_orders::ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(property_id),
            title: Set(input.title),
            order_type: Set(input.order_type),
            vendor: Set(input.vendor),
            cost: Set(input.cost),
            status: Set(input.status),
            notes: Set(input.notes),
            created_at: Set(now),
            updated_at: Set(now),
        };
        order.insert(&self.db).await
    }

    /// Applies a partial order update. Returns `None` when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_order(
        &self,
        order_id: Uuid,
        input: UpdateOrderInput,
    ) -> Result<Option<property_orders::Model>, DbErr> {
        let Some(order) = property_orders::Entity::find_by_id(order_id)
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };
        let mut active: property_orders::ActiveModel = order.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(order_type) = input.order_type {
            active.order_type = Set(order_type);
        }
        if let Some(vendor) = input.vendor {
            active.vendor = Set(vendor);
        }
        if let Some(cost) = input.cost {
            active.cost = Set(cost);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(notes) = input.notes {
            active.notes = Set(notes);
        }
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes an order. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_order(&self, order_id: Uuid) -> Result<bool, DbErr> {
        let result = property_orders::Entity::delete_by_id(order_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Counts orders still pending or ordered (not yet delivered/installed).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_active_orders(&self) -> Result<u64, DbErr> {
        property_orders::Entity::find()
            .filter(
                property_orders::Column::Status
                    .is_in([OrderStatus::Pending, OrderStatus::Ordered]),
            )
            .count(&self.db)
            .await
    }

    // ========================================================================
    // Setup tasks
    // ========================================================================

    /// Creates a setup checklist item for a property.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create_setup_task(
        &self,
        property_id: Uuid,
        title: &str,
    ) -> Result<setup_tasks::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let task = setup_tasks::ActiveModel {
            id: Set(Uuid::new_v4()),
            property_id: Set(property_id),
            title: Set(title.to_string()),
            done: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        task.insert(&self.db).await
    }

    /// Toggles a setup task. Returns `None` when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn set_setup_task_done(
        &self,
        task_id: Uuid,
        done: bool,
    ) -> Result<Option<setup_tasks::Model>, DbErr> {
        let Some(task) = setup_tasks::Entity::find_by_id(task_id).one(&self.db).await? else {
            return Ok(None);
        };
        let mut active: setup_tasks::ActiveModel = task.into();
        active.done = Set(done);
        active.updated_at = Set(chrono::Utc::now().into());
        Ok(Some(active.update(&self.db).await?))
    }

    /// Deletes a setup task. Returns false when the id did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete_setup_task(&self, task_id: Uuid) -> Result<bool, DbErr> {
        let result = setup_tasks::Entity::delete_by_id(task_id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
