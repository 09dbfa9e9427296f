//! Ledger error types for validation and state errors.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Entry is not balanced (debits != credits).
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// Line amounts cannot be negative.
    #[error("Line amounts cannot be negative")]
    NegativeAmount,

    /// A line must carry a nonzero debit or credit.
    #[error("Line must have a nonzero debit or credit")]
    EmptyLine,

    /// A line must not set both debit and credit.
    #[error("Line must not set both debit and credit")]
    BothSidesSet,

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Account is inactive and cannot be posted to.
    #[error("Account {0} is inactive")]
    AccountInactive(Uuid),

    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::Unbalanced { .. } => "UNBALANCED_ENTRY",
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::EmptyLine => "EMPTY_LINE",
            Self::BothSidesSet => "BOTH_SIDES_SET",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::InsufficientLines
            | Self::Unbalanced { .. }
            | Self::NegativeAmount
            | Self::EmptyLine
            | Self::BothSidesSet
            | Self::AccountInactive(_) => 400,
            Self::AccountNotFound(_) | Self::EntryNotFound(_) => 404,
            Self::Database(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            LedgerError::InsufficientLines.error_code(),
            "INSUFFICIENT_LINES"
        );
        assert_eq!(
            LedgerError::Unbalanced {
                debit: dec!(100.00),
                credit: dec!(99.00),
            }
            .error_code(),
            "UNBALANCED_ENTRY"
        );
        assert_eq!(LedgerError::BothSidesSet.error_code(), "BOTH_SIDES_SET");
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(LedgerError::InsufficientLines.http_status_code(), 400);
        assert_eq!(
            LedgerError::AccountNotFound(Uuid::nil()).http_status_code(),
            404
        );
        assert_eq!(
            LedgerError::Database("boom".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_unbalanced_display() {
        let err = LedgerError::Unbalanced {
            debit: dec!(100.00),
            credit: dec!(99.00),
        };
        assert_eq!(
            err.to_string(),
            "Journal entry is not balanced. Debit: 100.00, Credit: 99.00"
        );
    }
}
