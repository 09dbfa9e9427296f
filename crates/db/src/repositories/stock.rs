//! Stock repository: applies movement plans transactionally.
//!
//! The stock engine is the only writer of stock quantities. Every quantity
//! change is applied together with its immutable movement record in one
//! transaction; a failed movement changes nothing.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{products, sea_orm_active_enums, stock_movements, stocks, warehouses};
use stockbook_core::stock::{MovementType, StockError, StockMovementInput, StockService};
use stockbook_shared::types::{PageRequest, PageResponse, StockMovementId, WarehouseId};

/// Filter options for listing stock movements.
#[derive(Debug, Clone, Default)]
pub struct MovementFilter {
    /// Filter by product.
    pub product_id: Option<Uuid>,
    /// Filter by movement type.
    pub movement_type: Option<MovementType>,
}

/// Stock repository for quantity mutation and movement history.
#[derive(Debug, Clone)]
pub struct StockRepository {
    db: DatabaseConnection,
}

impl StockRepository {
    /// Creates a new stock repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a stock movement: validates it, writes the affected stock
    /// rows, and appends the movement record, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns a `StockError` describing the first violated rule; nothing
    /// is mutated on failure.
    pub async fn apply_movement(
        &self,
        input: StockMovementInput,
    ) -> Result<stock_movements::Model, StockError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let movement = apply_movement_in_txn(&txn, &input).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            product_id = %input.product_id,
            movement_type = ?input.movement_type,
            quantity = input.quantity,
            "stock movement applied"
        );
        crate::repositories::activity::record(
            &self.db,
            input.created_by,
            "CREATE",
            "StockMovement",
            movement.id,
            Some(format!(
                "Stock movement: {} - Quantity: {}",
                input.movement_type, input.quantity
            )),
        )
        .await;
        Ok(movement)
    }

    /// Lists stock rows, optionally restricted to one warehouse.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_stock(
        &self,
        warehouse_id: Option<WarehouseId>,
    ) -> Result<Vec<stocks::Model>, StockError> {
        let mut query = stocks::Entity::find();
        if let Some(warehouse_id) = warehouse_id {
            query = query.filter(stocks::Column::WarehouseId.eq(warehouse_id.into_inner()));
        }
        query.all(&self.db).await.map_err(db_err)
    }

    /// Lists stock movements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_movements(
        &self,
        filter: MovementFilter,
        page: PageRequest,
    ) -> Result<PageResponse<stock_movements::Model>, StockError> {
        let mut query = stock_movements::Entity::find();

        if let Some(product_id) = filter.product_id {
            query = query.filter(stock_movements::Column::ProductId.eq(product_id));
        }
        if let Some(movement_type) = filter.movement_type {
            query = query.filter(
                stock_movements::Column::MovementType
                    .eq(sea_orm_active_enums::MovementType::from(movement_type)),
            );
        }

        let query = query.order_by_desc(stock_movements::Column::CreatedAt);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let data = query
            .paginate(&self.db, page.limit())
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await
            .map_err(db_err)?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    /// Returns active products whose total on-hand quantity (across all
    /// warehouses) has fallen to or below their reorder level. Products
    /// with no reorder level configured (zero) are not reported.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn below_reorder_level(&self) -> Result<Vec<products::Model>, StockError> {
        let totals: Vec<(Uuid, Option<i64>)> = stocks::Entity::find()
            .select_only()
            .column(stocks::Column::ProductId)
            .column_as(stocks::Column::Quantity.sum(), "total")
            .group_by(stocks::Column::ProductId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;
        let totals: HashMap<Uuid, i64> = totals
            .into_iter()
            .map(|(id, total)| (id, total.unwrap_or(0)))
            .collect();

        let products = products::Entity::find()
            .filter(products::Column::Active.eq(true))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(products
            .into_iter()
            .filter(|p| {
                let on_hand = totals.get(&p.id).copied().unwrap_or(0);
                p.reorder_level > 0 && on_hand <= i64::from(p.reorder_level)
            })
            .collect())
    }
}

/// Applies a stock movement inside an existing transaction.
///
/// Used directly by `apply_movement` and by the order coordinators (sales
/// fulfillment, purchase receipt).
pub(crate) async fn apply_movement_in_txn(
    txn: &DatabaseTransaction,
    input: &StockMovementInput,
) -> Result<stock_movements::Model, StockError> {
    // Reference checks fail the whole movement up front.
    products::Entity::find_by_id(input.product_id.into_inner())
        .one(txn)
        .await
        .map_err(db_err)?
        .ok_or(StockError::ProductNotFound(input.product_id.into_inner()))?;

    for warehouse_id in [input.from_warehouse_id, input.to_warehouse_id]
        .into_iter()
        .flatten()
    {
        warehouses::Entity::find_by_id(warehouse_id.into_inner())
            .one(txn)
            .await
            .map_err(db_err)?
            .ok_or(StockError::WarehouseNotFound(warehouse_id.into_inner()))?;
    }

    // Snapshot on-hand quantities for the involved warehouses, then let the
    // state machine plan the writes.
    let mut rows: HashMap<Uuid, stocks::Model> = HashMap::new();
    for warehouse_id in [input.from_warehouse_id, input.to_warehouse_id]
        .into_iter()
        .flatten()
    {
        let row = stocks::Entity::find()
            .filter(stocks::Column::ProductId.eq(input.product_id.into_inner()))
            .filter(stocks::Column::WarehouseId.eq(warehouse_id.into_inner()))
            .one(txn)
            .await
            .map_err(db_err)?;
        if let Some(row) = row {
            rows.insert(warehouse_id.into_inner(), row);
        }
    }

    let plan = StockService::plan_movement(input, |warehouse_id| {
        rows.get(&warehouse_id.into_inner()).map(|r| r.quantity)
    })?;

    let now = Utc::now().into();
    for write in &plan.writes {
        match rows.get(&write.warehouse_id.into_inner()) {
            Some(existing) => {
                let mut active: stocks::ActiveModel = existing.clone().into();
                active.quantity = Set(write.new_quantity);
                active.updated_at = Set(now);
                active.update(txn).await.map_err(db_err)?;
            }
            None => {
                let active = stocks::ActiveModel {
                    id: Set(Uuid::now_v7()),
                    product_id: Set(input.product_id.into_inner()),
                    warehouse_id: Set(write.warehouse_id.into_inner()),
                    quantity: Set(write.new_quantity),
                    updated_at: Set(now),
                };
                active.insert(txn).await.map_err(db_err)?;
            }
        }
    }

    let movement = stock_movements::ActiveModel {
        id: Set(StockMovementId::new().into_inner()),
        product_id: Set(input.product_id.into_inner()),
        from_warehouse_id: Set(input.from_warehouse_id.map(WarehouseId::into_inner)),
        to_warehouse_id: Set(input.to_warehouse_id.map(WarehouseId::into_inner)),
        movement_type: Set(sea_orm_active_enums::MovementType::from(input.movement_type)),
        quantity: Set(input.quantity),
        notes: Set(input.notes.clone()),
        user_id: Set(input.created_by.into_inner()),
        created_at: Set(now),
    };

    movement.insert(txn).await.map_err(db_err)
}

fn db_err(e: DbErr) -> StockError {
    StockError::Database(e.to_string())
}
