//! Customer and supplier running-balance rules.
//!
//! A customer's balance is the receivable owed to the business; a supplier's
//! balance is the payable owed by the business. Both are adjusted only from
//! within the order-creation transactions, never by user-facing updates
//! (administrative balance overrides are a deliberate bypass handled by the
//! repository layer directly).

pub mod service;

pub use service::{purchase_payable_delta, sales_receivable_delta};
