//! Initial database migration.
//!
//! Creates all enums and tables for the ledger, inventory, sales, and
//! purchasing subsystems, plus the document sequence counters.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: CHART OF ACCOUNTS & LEDGER
        // ============================================================
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRIES_SQL).await?;
        db.execute_unprepared(JOURNAL_ENTRY_LINES_SQL).await?;

        // ============================================================
        // PART 3: PARTIES
        // ============================================================
        db.execute_unprepared(CUSTOMERS_SQL).await?;
        db.execute_unprepared(SUPPLIERS_SQL).await?;

        // ============================================================
        // PART 4: INVENTORY
        // ============================================================
        db.execute_unprepared(CATEGORIES_SQL).await?;
        db.execute_unprepared(PRODUCTS_SQL).await?;
        db.execute_unprepared(WAREHOUSES_SQL).await?;
        db.execute_unprepared(STOCKS_SQL).await?;
        db.execute_unprepared(STOCK_MOVEMENTS_SQL).await?;

        // ============================================================
        // PART 5: ORDERS
        // ============================================================
        db.execute_unprepared(SALES_ORDERS_SQL).await?;
        db.execute_unprepared(SALES_ORDER_ITEMS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDERS_SQL).await?;
        db.execute_unprepared(PURCHASE_ORDER_ITEMS_SQL).await?;

        // ============================================================
        // PART 6: INFRASTRUCTURE
        // ============================================================
        db.execute_unprepared(DOCUMENT_SEQUENCES_SQL).await?;
        db.execute_unprepared(ACTIVITY_LOGS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Account types
CREATE TYPE account_type AS ENUM (
    'ASSET',
    'LIABILITY',
    'EQUITY',
    'REVENUE',
    'EXPENSE'
);

-- Journal entry types
CREATE TYPE journal_type AS ENUM ('JOURNAL', 'SALE', 'PURCHASE');

-- Stock movement types
CREATE TYPE movement_type AS ENUM ('IN', 'OUT', 'TRANSFER', 'ADJUSTMENT');

-- Payment methods
CREATE TYPE payment_method AS ENUM ('CASH', 'CARD', 'TRANSFER', 'CREDIT');

-- Order lifecycle status
CREATE TYPE order_status AS ENUM (
    'pending',
    'completed',
    'received',
    'cancelled'
);
";

const ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    code VARCHAR(20) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    account_type account_type NOT NULL,
    balance DECIMAL(19, 4) NOT NULL DEFAULT 0,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    parent_id UUID REFERENCES accounts(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_accounts_code ON accounts(code);
CREATE INDEX idx_accounts_parent ON accounts(parent_id);
";

const JOURNAL_ENTRIES_SQL: &str = r"
CREATE TABLE journal_entries (
    id UUID PRIMARY KEY,
    entry_number VARCHAR(20) NOT NULL UNIQUE,
    date DATE NOT NULL,
    description TEXT NOT NULL,
    entry_type journal_type NOT NULL DEFAULT 'JOURNAL',
    reference_id UUID,
    user_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_journal_entries_date ON journal_entries(date);
CREATE INDEX idx_journal_entries_type ON journal_entries(entry_type);
";

const JOURNAL_ENTRY_LINES_SQL: &str = r"
CREATE TABLE journal_entry_lines (
    id UUID PRIMARY KEY,
    journal_entry_id UUID NOT NULL REFERENCES journal_entries(id) ON DELETE CASCADE,
    account_id UUID NOT NULL REFERENCES accounts(id),
    debit DECIMAL(19, 4) NOT NULL DEFAULT 0 CHECK (debit >= 0),
    credit DECIMAL(19, 4) NOT NULL DEFAULT 0 CHECK (credit >= 0),
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_journal_entry_lines_entry ON journal_entry_lines(journal_entry_id);
CREATE INDEX idx_journal_entry_lines_account ON journal_entry_lines(account_id);
";

const CUSTOMERS_SQL: &str = r"
CREATE TABLE customers (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    phone VARCHAR(50),
    address TEXT,
    balance DECIMAL(19, 4) NOT NULL DEFAULT 0,
    credit_limit DECIMAL(19, 4) NOT NULL DEFAULT 0,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const SUPPLIERS_SQL: &str = r"
CREATE TABLE suppliers (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255),
    phone VARCHAR(50),
    address TEXT,
    balance DECIMAL(19, 4) NOT NULL DEFAULT 0,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const CATEGORIES_SQL: &str = r"
CREATE TABLE categories (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    description TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const PRODUCTS_SQL: &str = r"
CREATE TABLE products (
    id UUID PRIMARY KEY,
    sku VARCHAR(100) NOT NULL UNIQUE,
    name VARCHAR(255) NOT NULL,
    category_id UUID NOT NULL REFERENCES categories(id),
    cost_price DECIMAL(19, 4) NOT NULL DEFAULT 0,
    selling_price DECIMAL(19, 4) NOT NULL DEFAULT 0,
    reorder_level INTEGER NOT NULL DEFAULT 0,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_products_category ON products(category_id);
";

const WAREHOUSES_SQL: &str = r"
CREATE TABLE warehouses (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL UNIQUE,
    location TEXT,
    active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const STOCKS_SQL: &str = r"
CREATE TABLE stocks (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL REFERENCES products(id),
    warehouse_id UUID NOT NULL REFERENCES warehouses(id),
    quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (product_id, warehouse_id)
);

CREATE INDEX idx_stocks_product ON stocks(product_id);
CREATE INDEX idx_stocks_warehouse ON stocks(warehouse_id);
";

const STOCK_MOVEMENTS_SQL: &str = r"
CREATE TABLE stock_movements (
    id UUID PRIMARY KEY,
    product_id UUID NOT NULL REFERENCES products(id),
    from_warehouse_id UUID REFERENCES warehouses(id),
    to_warehouse_id UUID REFERENCES warehouses(id),
    movement_type movement_type NOT NULL,
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    notes TEXT,
    user_id UUID NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_stock_movements_product ON stock_movements(product_id);
CREATE INDEX idx_stock_movements_created ON stock_movements(created_at);
";

const SALES_ORDERS_SQL: &str = r"
CREATE TABLE sales_orders (
    id UUID PRIMARY KEY,
    order_number VARCHAR(20) NOT NULL UNIQUE,
    customer_id UUID NOT NULL REFERENCES customers(id),
    user_id UUID NOT NULL,
    order_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    total_amount DECIMAL(19, 4) NOT NULL,
    discount DECIMAL(19, 4) NOT NULL DEFAULT 0,
    tax DECIMAL(19, 4) NOT NULL DEFAULT 0,
    grand_total DECIMAL(19, 4) NOT NULL,
    paid_amount DECIMAL(19, 4) NOT NULL DEFAULT 0,
    balance DECIMAL(19, 4) NOT NULL DEFAULT 0,
    status order_status NOT NULL DEFAULT 'pending',
    payment_method payment_method NOT NULL DEFAULT 'CASH',
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_sales_orders_customer ON sales_orders(customer_id);
CREATE INDEX idx_sales_orders_date ON sales_orders(order_date);
";

const SALES_ORDER_ITEMS_SQL: &str = r"
CREATE TABLE sales_order_items (
    id UUID PRIMARY KEY,
    sales_order_id UUID NOT NULL REFERENCES sales_orders(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id),
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    unit_price DECIMAL(19, 4) NOT NULL,
    total DECIMAL(19, 4) NOT NULL
);

CREATE INDEX idx_sales_order_items_order ON sales_order_items(sales_order_id);
";

const PURCHASE_ORDERS_SQL: &str = r"
CREATE TABLE purchase_orders (
    id UUID PRIMARY KEY,
    order_number VARCHAR(20) NOT NULL UNIQUE,
    supplier_id UUID NOT NULL REFERENCES suppliers(id),
    user_id UUID NOT NULL,
    order_date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    total_amount DECIMAL(19, 4) NOT NULL,
    discount DECIMAL(19, 4) NOT NULL DEFAULT 0,
    tax DECIMAL(19, 4) NOT NULL DEFAULT 0,
    grand_total DECIMAL(19, 4) NOT NULL,
    paid_amount DECIMAL(19, 4) NOT NULL DEFAULT 0,
    balance DECIMAL(19, 4) NOT NULL DEFAULT 0,
    status order_status NOT NULL DEFAULT 'pending',
    received_date TIMESTAMPTZ,
    notes TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_purchase_orders_supplier ON purchase_orders(supplier_id);
CREATE INDEX idx_purchase_orders_date ON purchase_orders(order_date);
";

const PURCHASE_ORDER_ITEMS_SQL: &str = r"
CREATE TABLE purchase_order_items (
    id UUID PRIMARY KEY,
    purchase_order_id UUID NOT NULL REFERENCES purchase_orders(id) ON DELETE CASCADE,
    product_id UUID NOT NULL REFERENCES products(id),
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    unit_price DECIMAL(19, 4) NOT NULL,
    total DECIMAL(19, 4) NOT NULL
);

CREATE INDEX idx_purchase_order_items_order ON purchase_order_items(purchase_order_id);
";

const DOCUMENT_SEQUENCES_SQL: &str = r"
CREATE TABLE document_sequences (
    kind VARCHAR(50) PRIMARY KEY,
    next_value BIGINT NOT NULL DEFAULT 0,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

INSERT INTO document_sequences (kind, next_value) VALUES
    ('journal_entry', 0),
    ('sales_order', 0),
    ('purchase_order', 0);
";

const ACTIVITY_LOGS_SQL: &str = r"
CREATE TABLE activity_logs (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL,
    action VARCHAR(50) NOT NULL,
    entity VARCHAR(100) NOT NULL,
    entity_id UUID NOT NULL,
    details TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_activity_logs_entity ON activity_logs(entity, entity_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS activity_logs;
DROP TABLE IF EXISTS document_sequences;
DROP TABLE IF EXISTS purchase_order_items;
DROP TABLE IF EXISTS purchase_orders;
DROP TABLE IF EXISTS sales_order_items;
DROP TABLE IF EXISTS sales_orders;
DROP TABLE IF EXISTS stock_movements;
DROP TABLE IF EXISTS stocks;
DROP TABLE IF EXISTS warehouses;
DROP TABLE IF EXISTS products;
DROP TABLE IF EXISTS categories;
DROP TABLE IF EXISTS suppliers;
DROP TABLE IF EXISTS customers;
DROP TABLE IF EXISTS journal_entry_lines;
DROP TABLE IF EXISTS journal_entries;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS order_status;
DROP TYPE IF EXISTS payment_method;
DROP TYPE IF EXISTS movement_type;
DROP TYPE IF EXISTS journal_type;
DROP TYPE IF EXISTS account_type;
";
