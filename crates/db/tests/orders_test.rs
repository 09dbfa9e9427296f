//! Integration tests for the sales and purchase coordinators.
//!
//! All tests require a running PostgreSQL (`DATABASE_URL`) and are ignored
//! by default: `cargo test -p stockbook-db -- --ignored`.

mod common;

use rust_decimal_macros::dec;
use sea_orm::EntityTrait;

use stockbook_core::orders::{
    CreatePurchaseOrderInput, CreateSalesOrderInput, OrderError, OrderItemInput, PaymentMethod,
};
use stockbook_core::stock::StockError;
use stockbook_db::entities::{journal_entries, sales_orders, stocks};
use stockbook_db::repositories::{PurchaseRepository, SalesRepository, StockRepository};
use stockbook_shared::config::LedgerConfig;
use stockbook_shared::types::{
    CustomerId, ProductId, PurchaseOrderId, SupplierId, UserId, WarehouseId,
};

fn sales_input(
    customer_id: CustomerId,
    product_id: ProductId,
    quantity: i32,
    payment_method: PaymentMethod,
    warehouse_id: Option<WarehouseId>,
) -> CreateSalesOrderInput {
    CreateSalesOrderInput {
        customer_id,
        items: vec![OrderItemInput {
            product_id,
            quantity,
            unit_price: None,
        }],
        discount: None,
        tax: None,
        payment_method,
        warehouse_id,
        notes: None,
        created_by: UserId::new(),
    }
}

async fn stock_quantity(db: &sea_orm::DatabaseConnection, warehouse_id: WarehouseId) -> Option<i32> {
    let repo = StockRepository::new(db.clone());
    let rows = repo.list_stock(Some(warehouse_id)).await.unwrap();
    rows.first().map(|r| r.quantity)
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_cash_sale_fans_out_atomically() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let customer = CustomerId::from_uuid(common::seed_customer(&db, "Acme").await);
    let product =
        ProductId::from_uuid(common::seed_product(&db, "SKU-1", dec!(10.00), dec!(6.00)).await);
    let warehouse = WarehouseId::from_uuid(common::seed_warehouse(&db, "Main").await);

    // Stock the warehouse with 10 units.
    let stock_repo = StockRepository::new(db.clone());
    stock_repo
        .apply_movement(stockbook_core::stock::StockMovementInput {
            product_id: product,
            movement_type: stockbook_core::stock::MovementType::In,
            quantity: 10,
            from_warehouse_id: None,
            to_warehouse_id: Some(warehouse),
            notes: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();

    let repo = SalesRepository::new(db.clone(), LedgerConfig::default());
    let created = repo
        .create_order(sales_input(customer, product, 3, PaymentMethod::Cash, Some(warehouse)))
        .await
        .unwrap();

    assert_eq!(created.order.order_number, "SO-000001");
    assert_eq!(created.order.grand_total, dec!(30.00));
    assert_eq!(created.order.balance, dec!(0));

    // Stock reduced 10 -> 7.
    assert_eq!(stock_quantity(&db, warehouse).await, Some(7));

    // Derived journal entry: cash debited, revenue credited.
    assert_eq!(common::account_balance(&db, "1100").await, dec!(30.00));
    assert_eq!(common::account_balance(&db, "4000").await, dec!(30.00));

    // Cash sale leaves the customer balance alone.
    let customer_row = stockbook_db::entities::customers::Entity::find_by_id(customer.into_inner())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer_row.balance, dec!(0));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_insufficient_stock_rolls_back_everything() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let customer = CustomerId::from_uuid(common::seed_customer(&db, "Acme").await);
    let product =
        ProductId::from_uuid(common::seed_product(&db, "SKU-1", dec!(10.00), dec!(6.00)).await);
    let warehouse = WarehouseId::from_uuid(common::seed_warehouse(&db, "Main").await);

    let stock_repo = StockRepository::new(db.clone());
    stock_repo
        .apply_movement(stockbook_core::stock::StockMovementInput {
            product_id: product,
            movement_type: stockbook_core::stock::MovementType::In,
            quantity: 1,
            from_warehouse_id: None,
            to_warehouse_id: Some(warehouse),
            notes: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();

    let repo = SalesRepository::new(db.clone(), LedgerConfig::default());
    let result = repo
        .create_order(sales_input(
            customer,
            product,
            5,
            PaymentMethod::Credit,
            Some(warehouse),
        ))
        .await;

    assert!(matches!(
        result,
        Err(OrderError::Stock(StockError::InsufficientStock {
            available: 1,
            requested: 5
        }))
    ));

    // Full rollback: no order, no journal entry, no balance change, stock
    // untouched.
    assert!(sales_orders::Entity::find().all(&db).await.unwrap().is_empty());
    assert!(journal_entries::Entity::find().all(&db).await.unwrap().is_empty());
    assert_eq!(common::account_balance(&db, "1200").await, dec!(0));
    assert_eq!(stock_quantity(&db, warehouse).await, Some(1));

    let customer_row = stockbook_db::entities::customers::Entity::find_by_id(customer.into_inner())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer_row.balance, dec!(0));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_credit_sale_accrues_receivable() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let customer = CustomerId::from_uuid(common::seed_customer(&db, "Acme").await);
    let product =
        ProductId::from_uuid(common::seed_product(&db, "SKU-1", dec!(25.00), dec!(15.00)).await);

    let repo = SalesRepository::new(db.clone(), LedgerConfig::default());
    let created = repo
        .create_order(sales_input(customer, product, 2, PaymentMethod::Credit, None))
        .await
        .unwrap();

    assert_eq!(created.order.grand_total, dec!(50.00));
    assert_eq!(created.order.balance, dec!(50.00));
    assert_eq!(created.order.paid_amount, dec!(0));

    // Receivable debited instead of cash; customer balance accrued.
    assert_eq!(common::account_balance(&db, "1200").await, dec!(50.00));
    assert_eq!(common::account_balance(&db, "1100").await, dec!(0));

    let customer_row = stockbook_db::entities::customers::Entity::find_by_id(customer.into_inner())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer_row.balance, dec!(50.00));

    // Settlement recomputes the balance; ledger and stock stay untouched.
    let updated = repo
        .update_order(
            stockbook_shared::types::SalesOrderId::from_uuid(created.order.id),
            stockbook_db::repositories::UpdateOrderInput {
                paid_amount: Some(dec!(20.00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.order.paid_amount, dec!(20.00));
    assert_eq!(updated.order.balance, dec!(30.00));
    assert_eq!(common::account_balance(&db, "1200").await, dec!(50.00));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_purchase_accrues_supplier_and_posts() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let supplier = SupplierId::from_uuid(common::seed_supplier(&db, "Supply Co").await);
    let product =
        ProductId::from_uuid(common::seed_product(&db, "SKU-1", dec!(10.00), dec!(6.00)).await);

    let repo = PurchaseRepository::new(db.clone(), LedgerConfig::default());
    let created = repo
        .create_order(CreatePurchaseOrderInput {
            supplier_id: supplier,
            items: vec![OrderItemInput {
                product_id: product,
                quantity: 4,
                unit_price: Some(dec!(5.00)),
            }],
            discount: None,
            tax: None,
            notes: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();

    assert_eq!(created.order.order_number, "PO-000001");
    assert_eq!(created.order.grand_total, dec!(20.00));
    assert_eq!(created.order.balance, dec!(20.00));

    // Accrual entry: inventory debited, payable credited.
    assert_eq!(common::account_balance(&db, "1300").await, dec!(20.00));
    assert_eq!(common::account_balance(&db, "2100").await, dec!(20.00));

    let supplier_row = stockbook_db::entities::suppliers::Entity::find_by_id(supplier.into_inner())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(supplier_row.balance, dec!(20.00));
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set DATABASE_URL)"]
async fn test_receive_purchase_order_once() {
    let db = common::fresh_db().await;
    common::seed_posting_accounts(&db).await;

    let supplier = SupplierId::from_uuid(common::seed_supplier(&db, "Supply Co").await);
    let product =
        ProductId::from_uuid(common::seed_product(&db, "SKU-1", dec!(10.00), dec!(6.00)).await);
    let warehouse = WarehouseId::from_uuid(common::seed_warehouse(&db, "Main").await);

    let repo = PurchaseRepository::new(db.clone(), LedgerConfig::default());
    let created = repo
        .create_order(CreatePurchaseOrderInput {
            supplier_id: supplier,
            items: vec![OrderItemInput {
                product_id: product,
                quantity: 6,
                unit_price: None,
            }],
            discount: None,
            tax: None,
            notes: None,
            created_by: UserId::new(),
        })
        .await
        .unwrap();

    let order_id = PurchaseOrderId::from_uuid(created.order.id);
    let received = repo
        .receive_order(order_id, warehouse, UserId::new())
        .await
        .unwrap();
    assert!(received.order.received_date.is_some());

    // Goods entered the warehouse.
    let rows = stocks::Entity::find().all(&db).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 6);

    // Receiving twice is a state conflict.
    let again = repo.receive_order(order_id, warehouse, UserId::new()).await;
    assert!(matches!(again, Err(OrderError::AlreadyReceived(_))));
}
