//! Stock error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while applying stock movements.
#[derive(Debug, Error)]
pub enum StockError {
    /// Movement quantity must be positive.
    #[error("Movement quantity must be positive")]
    NonPositiveQuantity,

    /// Movement type requires a source warehouse.
    #[error("Movement requires a source warehouse")]
    MissingSourceWarehouse,

    /// Movement type requires a destination warehouse.
    #[error("Movement requires a destination warehouse")]
    MissingDestinationWarehouse,

    /// Transfer source and destination must differ.
    #[error("Transfer source and destination must differ")]
    SameWarehouseTransfer,

    /// Not enough stock at the source warehouse.
    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock {
        /// Units on hand at the source warehouse.
        available: i32,
        /// Units the movement asked for.
        requested: i32,
    },

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Warehouse not found.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl StockError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            Self::MissingSourceWarehouse => "MISSING_SOURCE_WAREHOUSE",
            Self::MissingDestinationWarehouse => "MISSING_DESTINATION_WAREHOUSE",
            Self::SameWarehouseTransfer => "SAME_WAREHOUSE_TRANSFER",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::WarehouseNotFound(_) => "WAREHOUSE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NonPositiveQuantity
            | Self::MissingSourceWarehouse
            | Self::MissingDestinationWarehouse
            | Self::SameWarehouseTransfer => 400,
            Self::InsufficientStock { .. } => 409,
            Self::ProductNotFound(_) | Self::WarehouseNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}
