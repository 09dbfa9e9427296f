//! `SeaORM` entity definitions.

pub mod accounts;
pub mod activity_logs;
pub mod categories;
pub mod customers;
pub mod document_sequences;
pub mod journal_entries;
pub mod journal_entry_lines;
pub mod products;
pub mod purchase_order_items;
pub mod purchase_orders;
pub mod sales_order_items;
pub mod sales_orders;
pub mod sea_orm_active_enums;
pub mod stock_movements;
pub mod stocks;
pub mod suppliers;
pub mod warehouses;
