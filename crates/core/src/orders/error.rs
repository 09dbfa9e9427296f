//! Order error types.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while creating or settling an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order must have at least one item.
    #[error("Order must have at least one item")]
    NoItems,

    /// Item quantity must be positive.
    #[error("Item quantity must be positive for product {0}")]
    InvalidQuantity(Uuid),

    /// Discount cannot be negative.
    #[error("Discount cannot be negative")]
    NegativeDiscount,

    /// Tax cannot be negative.
    #[error("Tax cannot be negative")]
    NegativeTax,

    /// Unit price cannot be negative.
    #[error("Unit price cannot be negative for product {0}")]
    NegativeUnitPrice(Uuid),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    /// Product is inactive and cannot be ordered.
    #[error("Product {0} is inactive")]
    ProductInactive(Uuid),

    /// Customer not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    /// Supplier not found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(Uuid),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(Uuid),

    /// Purchase order has already been received.
    #[error("Purchase order {0} has already been received")]
    AlreadyReceived(Uuid),

    /// A configured posting account is missing from the chart of accounts.
    #[error("Posting account with code {0} does not exist")]
    PostingAccountMissing(String),

    /// Paid amount cannot be negative.
    #[error("Paid amount cannot be negative")]
    NegativePaidAmount,

    /// Stock effect of the order failed.
    #[error(transparent)]
    Stock(#[from] crate::stock::StockError),

    /// Derived ledger posting failed.
    #[error(transparent)]
    Ledger(#[from] crate::ledger::LedgerError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl OrderError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoItems => "NO_ITEMS",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::NegativeDiscount => "NEGATIVE_DISCOUNT",
            Self::NegativeTax => "NEGATIVE_TAX",
            Self::NegativeUnitPrice(_) => "NEGATIVE_UNIT_PRICE",
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::ProductInactive(_) => "PRODUCT_INACTIVE",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::SupplierNotFound(_) => "SUPPLIER_NOT_FOUND",
            Self::OrderNotFound(_) => "ORDER_NOT_FOUND",
            Self::AlreadyReceived(_) => "ALREADY_RECEIVED",
            Self::PostingAccountMissing(_) => "POSTING_ACCOUNT_MISSING",
            Self::NegativePaidAmount => "NEGATIVE_PAID_AMOUNT",
            Self::Stock(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::NoItems
            | Self::InvalidQuantity(_)
            | Self::NegativeDiscount
            | Self::NegativeTax
            | Self::NegativeUnitPrice(_)
            | Self::ProductInactive(_)
            | Self::NegativePaidAmount => 400,
            Self::ProductNotFound(_)
            | Self::CustomerNotFound(_)
            | Self::SupplierNotFound(_)
            | Self::OrderNotFound(_) => 404,
            Self::AlreadyReceived(_) => 409,
            Self::Stock(e) => e.http_status_code(),
            Self::Ledger(e) => e.http_status_code(),
            Self::PostingAccountMissing(_) | Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(OrderError::NoItems.error_code(), "NO_ITEMS");
        assert_eq!(
            OrderError::AlreadyReceived(Uuid::nil()).error_code(),
            "ALREADY_RECEIVED"
        );
        assert_eq!(
            OrderError::PostingAccountMissing("1100".to_string()).error_code(),
            "POSTING_ACCOUNT_MISSING"
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(OrderError::NoItems.http_status_code(), 400);
        assert_eq!(
            OrderError::ProductNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            OrderError::AlreadyReceived(Uuid::nil()).http_status_code(),
            409
        );
        assert_eq!(
            OrderError::PostingAccountMissing("1100".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_stock_errors_pass_through() {
        let err = OrderError::from(crate::stock::StockError::InsufficientStock {
            available: 0,
            requested: 1,
        });
        assert_eq!(err.error_code(), "INSUFFICIENT_STOCK");
        assert_eq!(err.http_status_code(), 409);
    }

    #[test]
    fn test_ledger_errors_pass_through() {
        let err = OrderError::from(crate::ledger::LedgerError::InsufficientLines);
        assert_eq!(err.error_code(), "INSUFFICIENT_LINES");
        assert_eq!(err.http_status_code(), 400);
    }
}
