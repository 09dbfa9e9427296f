//! Sales and purchase order logic.
//!
//! This module computes everything about a commercial document that does not
//! require storage: line pricing, order totals, the derived journal lines the
//! ledger posts for the order, and settlement arithmetic. The db layer wraps
//! these in the transaction that persists the order and its side effects.

pub mod error;
pub mod service;
pub mod types;

pub use error::OrderError;
pub use service::OrderService;
pub use types::{
    CreatePurchaseOrderInput, CreateSalesOrderInput, OrderItemInput, OrderStatus, OrderTotals,
    PaymentMethod, PostingAccounts, PricedItem, ProductInfo, Settlement,
};
