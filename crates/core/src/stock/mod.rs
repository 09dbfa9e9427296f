//! Stock movement planning.
//!
//! Every change to a stock quantity is driven by a movement
//! (IN/OUT/TRANSFER/ADJUSTMENT). This module validates a movement request
//! and plans the exact stock-row writes it implies; the db layer applies the
//! plan and appends the immutable movement record in one transaction.

pub mod error;
pub mod service;
pub mod types;

pub use error::StockError;
pub use service::StockService;
pub use types::{MovementPlan, MovementType, StockMovementInput, StockWrite};
