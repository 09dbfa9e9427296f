//! Database enum types mapped to PostgreSQL enums.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Chart-of-accounts classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Asset account (debit-normal).
    #[sea_orm(string_value = "ASSET")]
    Asset,
    /// Liability account (credit-normal).
    #[sea_orm(string_value = "LIABILITY")]
    Liability,
    /// Equity account (credit-normal).
    #[sea_orm(string_value = "EQUITY")]
    Equity,
    /// Revenue account (credit-normal).
    #[sea_orm(string_value = "REVENUE")]
    Revenue,
    /// Expense account (debit-normal).
    #[sea_orm(string_value = "EXPENSE")]
    Expense,
}

impl From<AccountType> for stockbook_core::ledger::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
        }
    }
}

impl From<stockbook_core::ledger::AccountType> for AccountType {
    fn from(value: stockbook_core::ledger::AccountType) -> Self {
        use stockbook_core::ledger::AccountType as Core;
        match value {
            Core::Asset => Self::Asset,
            Core::Liability => Self::Liability,
            Core::Equity => Self::Equity,
            Core::Revenue => Self::Revenue,
            Core::Expense => Self::Expense,
        }
    }
}

/// Journal entry classification.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "journal_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum JournalType {
    /// Manually posted journal entry.
    #[sea_orm(string_value = "JOURNAL")]
    Journal,
    /// Entry derived from a sales order.
    #[sea_orm(string_value = "SALE")]
    Sale,
    /// Entry derived from a purchase order.
    #[sea_orm(string_value = "PURCHASE")]
    Purchase,
}

impl From<stockbook_core::ledger::JournalType> for JournalType {
    fn from(value: stockbook_core::ledger::JournalType) -> Self {
        use stockbook_core::ledger::JournalType as Core;
        match value {
            Core::Journal => Self::Journal,
            Core::Sale => Self::Sale,
            Core::Purchase => Self::Purchase,
        }
    }
}

/// Kind of stock movement.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "movement_type")]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Goods entering a warehouse.
    #[sea_orm(string_value = "IN")]
    In,
    /// Goods leaving a warehouse.
    #[sea_orm(string_value = "OUT")]
    Out,
    /// Goods moving between warehouses.
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
    /// Absolute quantity correction.
    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
}

impl From<stockbook_core::stock::MovementType> for MovementType {
    fn from(value: stockbook_core::stock::MovementType) -> Self {
        use stockbook_core::stock::MovementType as Core;
        match value {
            Core::In => Self::In,
            Core::Out => Self::Out,
            Core::Transfer => Self::Transfer,
            Core::Adjustment => Self::Adjustment,
        }
    }
}

/// Payment method on a sales order.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "payment_method")]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Cash on the spot.
    #[sea_orm(string_value = "CASH")]
    Cash,
    /// Card payment.
    #[sea_orm(string_value = "CARD")]
    Card,
    /// Bank transfer.
    #[sea_orm(string_value = "TRANSFER")]
    Transfer,
    /// On account.
    #[sea_orm(string_value = "CREDIT")]
    Credit,
}

impl From<stockbook_core::orders::PaymentMethod> for PaymentMethod {
    fn from(value: stockbook_core::orders::PaymentMethod) -> Self {
        use stockbook_core::orders::PaymentMethod as Core;
        match value {
            Core::Cash => Self::Cash,
            Core::Card => Self::Card,
            Core::Transfer => Self::Transfer,
            Core::Credit => Self::Credit,
        }
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "order_status")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting settlement or receipt.
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Fully settled.
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Goods received.
    #[sea_orm(string_value = "received")]
    Received,
    /// Cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<stockbook_core::orders::OrderStatus> for OrderStatus {
    fn from(value: stockbook_core::orders::OrderStatus) -> Self {
        use stockbook_core::orders::OrderStatus as Core;
        match value {
            Core::Pending => Self::Pending,
            Core::Completed => Self::Completed,
            Core::Received => Self::Received,
            Core::Cancelled => Self::Cancelled,
        }
    }
}
