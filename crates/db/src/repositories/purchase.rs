//! Purchase repository: the document engine's coordinator for purchases.
//!
//! Creating a purchase order persists the order and its items, posts the
//! accrual journal entry (Inventory / Accounts Payable), and accrues the
//! supplier's payable balance in one transaction. Stock enters later,
//! through the receive flow, which applies one IN movement per item and
//! marks the order received, again as one unit.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    purchase_order_items, purchase_orders, sea_orm_active_enums, suppliers,
};
use crate::repositories::sales::{db_err, fetch_products};
use crate::repositories::{account, journal, party, sequence, stock};
use stockbook_core::ledger::{JournalType, PostJournalEntryInput};
use stockbook_core::orders::{CreatePurchaseOrderInput, OrderError, OrderService, PricedItem};
use stockbook_core::party::purchase_payable_delta;
use stockbook_core::stock::{MovementType, StockMovementInput};
use stockbook_shared::config::LedgerConfig;
use stockbook_shared::types::money::format_money;
use stockbook_shared::types::{
    DocumentKind, PageRequest, PageResponse, ProductId, PurchaseOrderId, UserId, WarehouseId,
};

pub use crate::repositories::sales::UpdateOrderInput;

/// Filter options for listing purchase orders.
#[derive(Debug, Clone, Default)]
pub struct PurchaseOrderFilter {
    /// Filter by supplier.
    pub supplier_id: Option<Uuid>,
    /// Filter by order date range start.
    pub date_from: Option<DateTime<Utc>>,
    /// Filter by order date range end.
    pub date_to: Option<DateTime<Utc>>,
}

/// A purchase order with its line items.
#[derive(Debug, Clone)]
pub struct PurchaseOrderWithItems {
    /// Order header.
    pub order: purchase_orders::Model,
    /// Line items.
    pub items: Vec<purchase_order_items::Model>,
}

/// Purchase repository for order creation, settlement, and receipt.
#[derive(Debug, Clone)]
pub struct PurchaseRepository {
    db: DatabaseConnection,
    ledger_config: LedgerConfig,
}

impl PurchaseRepository {
    /// Creates a new purchase repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection, ledger_config: LedgerConfig) -> Self {
        Self { db, ledger_config }
    }

    /// Creates a purchase order with its accrual effects.
    ///
    /// # Errors
    ///
    /// Returns an `OrderError` describing the first failed step; nothing is
    /// persisted on failure.
    pub async fn create_order(
        &self,
        input: CreatePurchaseOrderInput,
    ) -> Result<PurchaseOrderWithItems, OrderError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        suppliers::Entity::find_by_id(input.supplier_id.into_inner())
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::SupplierNotFound(input.supplier_id.into_inner()))?;

        let product_map = fetch_products(&txn, input.items.iter().map(|i| i.product_id)).await?;
        let priced = OrderService::price_purchase_items(&input.items, |id: ProductId| {
            product_map
                .get(&id.into_inner())
                .cloned()
                .ok_or(OrderError::ProductNotFound(id.into_inner()))
        })?;
        let totals = OrderService::compute_totals(&priced, input.discount, input.tax)?;

        let order_number = sequence::next_document_number(&txn, DocumentKind::PurchaseOrder)
            .await
            .map_err(db_err)?;
        let settlement = OrderService::initial_purchase_settlement(totals.grand_total);

        let now = Utc::now().into();
        let order = purchase_orders::ActiveModel {
            id: Set(PurchaseOrderId::new().into_inner()),
            order_number: Set(order_number.as_str().to_string()),
            supplier_id: Set(input.supplier_id.into_inner()),
            user_id: Set(input.created_by.into_inner()),
            order_date: Set(now),
            total_amount: Set(totals.total_amount),
            discount: Set(totals.discount),
            tax: Set(totals.tax),
            grand_total: Set(totals.grand_total),
            paid_amount: Set(settlement.paid_amount),
            balance: Set(settlement.balance),
            status: Set(sea_orm_active_enums::OrderStatus::from(settlement.status)),
            received_date: Set(None),
            notes: Set(input.notes.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let order = order.insert(&txn).await.map_err(db_err)?;

        let items = insert_items(&txn, order.id, &priced).await?;

        // Accrual entry: debit Inventory, credit Accounts Payable.
        let posting_accounts = account::find_posting_accounts(&txn, &self.ledger_config).await?;
        let lines =
            OrderService::purchase_journal_lines(totals.grand_total, &posting_accounts, &order_number);
        journal::post_entry_in_txn(
            &txn,
            &PostJournalEntryInput {
                date: Utc::now().date_naive(),
                description: format!("Purchase Order {order_number}"),
                entry_type: JournalType::Purchase,
                lines,
                reference_id: Some(order.id),
                created_by: input.created_by,
            },
        )
        .await?;

        // Purchases always accrue to the supplier balance.
        let delta = purchase_payable_delta(totals.grand_total);
        party::adjust_supplier_balance(&txn, input.supplier_id, delta).await?;

        txn.commit().await.map_err(db_err)?;

        info!(
            order_number = %order.order_number,
            grand_total = %order.grand_total,
            "purchase order created"
        );
        crate::repositories::activity::record(
            &self.db,
            input.created_by,
            "CREATE",
            "PurchaseOrder",
            order.id,
            Some(format!(
                "Created purchase order: {} (grand total {})",
                order.order_number,
                format_money(order.grand_total)
            )),
        )
        .await;
        Ok(PurchaseOrderWithItems { order, items })
    }

    /// Receives a purchase order into a warehouse: one IN movement per item,
    /// then the order is marked received with a timestamp.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyReceived` if the order was received before, or
    /// `OrderNotFound` if it does not exist.
    pub async fn receive_order(
        &self,
        id: PurchaseOrderId,
        warehouse_id: WarehouseId,
        received_by: UserId,
    ) -> Result<PurchaseOrderWithItems, OrderError> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&txn)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::OrderNotFound(id.into_inner()))?;

        if order.status == sea_orm_active_enums::OrderStatus::Received {
            return Err(OrderError::AlreadyReceived(id.into_inner()));
        }

        let items = purchase_order_items::Entity::find()
            .filter(purchase_order_items::Column::PurchaseOrderId.eq(order.id))
            .all(&txn)
            .await
            .map_err(db_err)?;

        for item in &items {
            stock::apply_movement_in_txn(
                &txn,
                &StockMovementInput {
                    product_id: ProductId::from_uuid(item.product_id),
                    movement_type: MovementType::In,
                    quantity: item.quantity,
                    from_warehouse_id: None,
                    to_warehouse_id: Some(warehouse_id),
                    notes: Some(format!("Purchase order: {}", order.order_number)),
                    created_by: received_by,
                },
            )
            .await?;
        }

        let mut active_model: purchase_orders::ActiveModel = order.into();
        active_model.status = Set(sea_orm_active_enums::OrderStatus::Received);
        active_model.received_date = Set(Some(Utc::now().into()));
        active_model.updated_at = Set(Utc::now().into());
        let order = active_model.update(&txn).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;

        info!(order_number = %order.order_number, "purchase order received");
        Ok(PurchaseOrderWithItems { order, items })
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
        id: PurchaseOrderId,
        input: UpdateOrderInput,
    ) -> Result<PurchaseOrderWithItems, OrderError> {
        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::OrderNotFound(id.into_inner()))?;

        let grand_total = order.grand_total;
        let mut active_model: purchase_orders::ActiveModel = order.into();
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
        Ok(PurchaseOrderWithItems { order, items })
    }

    /// Gets a purchase order with its items.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist.
    pub async fn get_order(&self, id: PurchaseOrderId) -> Result<PurchaseOrderWithItems, OrderError> {
        let order = purchase_orders::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(OrderError::OrderNotFound(id.into_inner()))?;
        let items = self.fetch_items(order.id).await?;
        Ok(PurchaseOrderWithItems { order, items })
    }

    /// Lists purchase orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_orders(
        &self,
        filter: PurchaseOrderFilter,
        page: PageRequest,
    ) -> Result<PageResponse<purchase_orders::Model>, OrderError> {
        let mut query = purchase_orders::Entity::find();

        if let Some(supplier_id) = filter.supplier_id {
            query = query.filter(purchase_orders::Column::SupplierId.eq(supplier_id));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(purchase_orders::Column::OrderDate.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(purchase_orders::Column::OrderDate.lte(to));
        }

        let query = query.order_by_desc(purchase_orders::Column::OrderDate);
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
    ) -> Result<Vec<purchase_order_items::Model>, OrderError> {
        purchase_order_items::Entity::find()
            .filter(purchase_order_items::Column::PurchaseOrderId.eq(order_id))
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

async fn insert_items(
    txn: &DatabaseTransaction,
    order_id: Uuid,
    priced: &[PricedItem],
) -> Result<Vec<purchase_order_items::Model>, OrderError> {
    let mut items = Vec::with_capacity(priced.len());
    for item in priced {
        let model = purchase_order_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            purchase_order_id: Set(order_id),
            product_id: Set(item.product_id.into_inner()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            total: Set(item.total),
        };
        items.push(model.insert(txn).await.map_err(db_err)?);
    }
    Ok(items)
}
