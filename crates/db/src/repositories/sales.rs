//! Sales repository: the document engine's coordinator for sales orders.
//!
//! Creating a sales order persists the order and its items, reduces stock
//! when a warehouse is given, posts the derived journal entry, and accrues
//! the customer's receivable for credit sales, all inside one database
//! transaction. The first failure (insufficient stock, missing posting
//! account, unknown customer) rolls back every prior step.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    customers, products, sales_order_items, sales_orders, sea_orm_active_enums,
};
use crate::repositories::{account, journal, party, sequence, stock};
use stockbook_core::ledger::{JournalType, PostJournalEntryInput};
use stockbook_core::orders::{
    CreateSalesOrderInput, OrderError, OrderService, OrderStatus, PricedItem, ProductInfo,
};
use stockbook_core::party::sales_receivable_delta;
use stockbook_core::stock::{MovementType, StockMovementInput};
use stockbook_shared::config::LedgerConfig;
use stockbook_shared::types::money::format_money;
use stockbook_shared::types::{DocumentKind, PageRequest, PageResponse, ProductId, SalesOrderId};

/// Filter options for listing sales orders.
#[derive(Debug, Clone, Default)]
pub struct SalesOrderFilter {
    /// Filter by customer.
    pub customer_id: Option<Uuid>,
    /// Filter by order date range start.
    pub date_from: Option<DateTime<Utc>>,
    /// Filter by order date range end.
    pub date_to: Option<DateTime<Utc>>,
}

/// Input for a settlement update on an order.
#[derive(Debug, Clone, Default)]
pub struct UpdateOrderInput {
    /// New status.
    pub status: Option<OrderStatus>,
    /// New paid amount; the outstanding balance is recomputed from it.
    pub paid_amount: Option<rust_decimal::Decimal>,
    /// New notes.
    pub notes: Option<String>,
}

/// A sales order with its line items.
#[derive(Debug, Clone)]
pub struct SalesOrderWithItems {
    /// Order header.
    pub order: sales_orders::Model,
    /// Line items.
    pub items: Vec<sales_order_items::Model>,
}

/// Sales repository for order creation and settlement.
#[derive(Debug, Clone)]
pub struct SalesRepository {
    db: DatabaseConnection,
    ledger_config: LedgerConfig,
}

impl SalesRepository {
    /// Creates a new sales repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, ledger_config: LedgerConfig) -> Self {
        Self { db, ledger_config }
    }

    /// Creates a sales order with all of its dependent effects.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError` describing the first failed step; nothing is
    /// persisted on failure.
    pub async fn create_order(
        &self,
        input: CreateSalesOrderInput,
    ) -> Result<SalesOrderWithItems, OrderError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        customers::Entity::find_by_id(input.customer_id.into_inner())
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::CustomerNotFound(input.customer_id.into_inner()))?;

        let product_map = fetch_products(&txn, input.items.iter().map(|i| i.product_id)).await?;
        let priced = OrderService::price_sales_items(&input.items, |id: ProductId| {
            product_map
                .get(&id.into_inner())
                .cloned()
                .ok_or(OrderError::ProductNotFound(id.into_inner()))
        })?;
        let totals = OrderService::compute_totals(&priced, input.discount, input.tax)?;

        let order_number = sequence::next_document_number(&txn, DocumentKind::SalesOrder)
            .await
            .map_err(db_err)?;
        let settlement =
            OrderService::initial_sales_settlement(input.payment_method, totals.grand_total);

        let now = Utc::now().into();
        let order = sales_orders::ActiveModel {
            id: Set(SalesOrderId::new().into_inner()),
            order_number: Set(order_number.as_str().to_string()),
            customer_id: Set(input.customer_id.into_inner()),
            user_id: Set(input.created_by.into_inner()),
            order_date: Set(now),
            total_amount: Set(totals.total_amount),
            discount: Set(totals.discount),
            tax: Set(totals.tax),
            grand_total: Set(totals.grand_total),
            paid_amount: Set(settlement.paid_amount),
            balance: Set(settlement.balance),
            status: Set(sea_orm_active_enums::OrderStatus::from(settlement.status)),
            payment_method: Set(sea_orm_active_enums::PaymentMethod::from(
                input.payment_method,
            )),
            notes: Set(input.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let order = order.insert(&txn).await.map_err(db_err)?;

        let items = insert_items(&txn, order.id, &priced).await?;

        // Fulfillment: one OUT movement per line. Insufficient stock aborts
        // the whole order.
        if let Some(warehouse_id) = input.warehouse_id {
            for item in &priced {
                stock::apply_movement_in_txn(
                    &txn,
                    &StockMovementInput {
                        product_id: item.product_id,
                        movement_type: MovementType::Out,
                        quantity: item.quantity,
                        from_warehouse_id: Some(warehouse_id),
                        to_warehouse_id: None,
                        notes: Some(format!("Sales order: {order_number}")),
                        created_by: input.created_by,
                    },
                )
                .await?;
            }
        }

        // Derived journal entry for the sale.
        let posting_accounts = account::find_posting_accounts(&txn, &self.ledger_config).await?;
        let lines = OrderService::sales_journal_lines(
            totals.grand_total,
            input.payment_method,
            &posting_accounts,
            &order_number,
        );
        journal::post_entry_in_txn(
            &txn,
            &PostJournalEntryInput {
                date: Utc::now().date_naive(),
                description: format!("Sales Order {order_number}"),
                entry_type: JournalType::Sale,
                lines,
                reference_id: Some(order.id),
                created_by: input.created_by,
            },
        )
        .await?;

        // Credit sales accrue to the customer's receivable balance.
        let delta = sales_receivable_delta(input.payment_method, totals.grand_total);
        if !delta.is_zero() {
            party::adjust_customer_balance(&txn, input.customer_id, delta).await?;
        }

        txn.commit().await.map_err(db_err)?;

        info!(
            order_number = %order.order_number,
            grand_total = %order.grand_total,
            "sales order created"
        );
        crate::repositories::activity::record(
            &self.db,
            input.created_by,
            "CREATE",
            "SalesOrder",
            order.id,
            Some(format!(
                "Created sales order: {} (grand total {})",
                order.order_number,
                format_money(order.grand_total)
            )),
        )
        .await;
        Ok(SalesOrderWithItems { order, items })
    }

    /// Applies a settlement update: `balance = grand_total - paid_amount`.
    ///
    /// Never re-triggers ledger or stock effects.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist or the paid amount is
    /// negative.
    pub async fn update_order(
        &self,
        id: SalesOrderId,
        input: UpdateOrderInput,
    ) -> Result<SalesOrderWithItems, OrderError> {
        let order = sales_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::OrderNotFound(id.into_inner()))?;

        let grand_total = order.grand_total;
        let mut active_model: sales_orders::ActiveModel = order.into();
        if let Some(paid_amount) = input.paid_amount {
            let balance = OrderService::settle(grand_total, paid_amount)?;
            active_model.paid_amount = Set(paid_amount);
            active_model.balance = Set(balance);
        }
        if let Some(status) = input.status {
            active_model.status = Set(sea_orm_active_enums::OrderStatus::from(status));
        }
        if let Some(notes) = input.notes {
            active_model.notes = Set(Some(notes));
        }
        active_model.updated_at = Set(Utc::now().into());

        let order = active_model.update(&self.db).await.map_err(db_err)?;
        let items = self.fetch_items(order.id).await?;
        Ok(SalesOrderWithItems { order, items })
    }

    /// Gets a sales order with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist.
    pub async fn get_order(&self, id: SalesOrderId) -> Result<SalesOrderWithItems, OrderError> {
        let order = sales_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::OrderNotFound(id.into_inner()))?;
        let items = self.fetch_items(order.id).await?;
        Ok(SalesOrderWithItems { order, items })
    }

    /// Lists sales orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_orders(
        &self,
        filter: SalesOrderFilter,
        page: PageRequest,
    ) -> Result<PageResponse<sales_orders::Model>, OrderError> {
        let mut query = sales_orders::Entity::find();

        if let Some(customer_id) = filter.customer_id {
            query = query.filter(sales_orders::Column::CustomerId.eq(customer_id));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(sales_orders::Column::OrderDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(sales_orders::Column::OrderDate.lte(to));
        }

        let query = query.order_by_desc(sales_orders::Column::OrderDate);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let data = query
            .paginate(&self.db, page.limit())
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await
            .map_err(db_err)?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }

    async fn fetch_items(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<sales_order_items::Model>, OrderError> {
        sales_order_items::Entity::find()
            .filter(sales_order_items::Column::SalesOrderId.eq(order_id))
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

/// Fetches and converts the products referenced by order items.
pub(crate) async fn fetch_products(
    txn: &DatabaseTransaction,
    product_ids: impl Iterator<Item = ProductId>,
) -> Result<HashMap<Uuid, ProductInfo>, OrderError> {
    let mut map = HashMap::new();
    for product_id in product_ids {
        let id = product_id.into_inner();
        if map.contains_key(&id) {
            continue;
        }
        let product = products::Entity::find_by_id(id)
            .one(txn)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::ProductNotFound(id))?;
        map.insert(
            id,
            ProductInfo {
                id: product_id,
                selling_price: product.selling_price,
                cost_price: product.cost_price,
                is_active: product.active,
            },
        );
    }
    Ok(map)
}

async fn insert_items(
    txn: &DatabaseTransaction,
    order_id: Uuid,
    priced: &[PricedItem],
) -> Result<Vec<sales_order_items::Model>, OrderError> {
    let mut items = Vec::with_capacity(priced.len());
    for item in priced {
        let model = sales_order_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            sales_order_id: Set(order_id),
            product_id: Set(item.product_id.into_inner()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            total: Set(item.total),
        };
        items.push(model.insert(txn).await.map_err(db_err)?);
    }
    Ok(items)
}

pub(crate) fn db_err(e: DbErr) -> OrderError {
    OrderError::Database(e.to_string())
}
