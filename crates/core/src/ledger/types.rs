//! Ledger domain types for journal entry creation and validation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{AccountId, UserId};
use uuid::Uuid;

/// Chart-of-accounts classification.
///
/// The account type is the single source of truth for how balances
/// accumulate: debit-normal accounts grow with debits, credit-normal
/// accounts grow with credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Asset account (debit-normal).
    Asset,
    /// Liability account (credit-normal).
    Liability,
    /// Equity account (credit-normal).
    Equity,
    /// Revenue account (credit-normal).
    Revenue,
    /// Expense account (debit-normal).
    Expense,
}

impl AccountType {
    /// Returns true for accounts whose balance grows with debits.
    #[must_use]
    pub const fn is_debit_normal(self) -> bool {
        matches!(self, Self::Asset | Self::Expense)
    }

    /// Calculates the running-balance change a line applies to an account
    /// of this type.
    ///
    /// Asset/Expense: `balance += debit - credit`.
    /// Liability/Equity/Revenue: `balance += credit - debit`.
    #[must_use]
    pub fn balance_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        if self.is_debit_normal() {
            debit - credit
        } else {
            credit - debit
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Revenue => "REVENUE",
            Self::Expense => "EXPENSE",
        };
        write!(f, "{s}")
    }
}

/// Journal entry classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JournalType {
    /// Manually posted journal entry.
    Journal,
    /// Entry derived from a sales order.
    Sale,
    /// Entry derived from a purchase order.
    Purchase,
}

/// Input for a single journal line.
///
/// Exactly one of `debit`/`credit` must be nonzero; both amounts default to
/// zero when unspecified and are never negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLineInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default, with = "rust_decimal::serde::str")]
    pub credit: Decimal,
    /// Optional description for this line.
    pub description: Option<String>,
}

impl JournalLineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal, description: Option<String>) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description,
        }
    }
}

/// Input for posting a journal entry.
#[derive(Debug, Clone)]
pub struct PostJournalEntryInput {
    /// The entry date.
    pub date: NaiveDate,
    /// Free-text description of the financial event.
    pub description: String,
    /// Entry classification.
    pub entry_type: JournalType,
    /// The journal lines (must have at least 2).
    pub lines: Vec<JournalLineInput>,
    /// Optional reference to the originating document (order id).
    pub reference_id: Option<Uuid>,
    /// The user posting the entry.
    pub created_by: UserId,
}

/// A journal line resolved against its account.
///
/// After validation and account lookup, each line carries the
/// running-balance change its account will absorb.
#[derive(Debug, Clone)]
pub struct ResolvedLine {
    /// The account to post to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance change for the account, per its type's polarity.
    pub balance_change: Decimal,
    /// Optional description.
    pub description: Option<String>,
}

/// Entry totals for validation and display.
#[derive(Debug, Clone)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Decimal,
    /// Total credit amount.
    pub credit: Decimal,
    /// Whether the entry is balanced (debits == credits, exact).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates new entry totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Decimal, credit: Decimal) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit - self.credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_debit_normal_types() {
        assert!(AccountType::Asset.is_debit_normal());
        assert!(AccountType::Expense.is_debit_normal());
        assert!(!AccountType::Liability.is_debit_normal());
        assert!(!AccountType::Equity.is_debit_normal());
        assert!(!AccountType::Revenue.is_debit_normal());
    }

    #[test]
    fn test_asset_balance_change() {
        // Debit increases, credit decreases.
        assert_eq!(
            AccountType::Asset.balance_change(dec!(100.00), Decimal::ZERO),
            dec!(100.00)
        );
        assert_eq!(
            AccountType::Asset.balance_change(Decimal::ZERO, dec!(40.00)),
            dec!(-40.00)
        );
    }

    #[test]
    fn test_revenue_balance_change() {
        // Credit increases, debit decreases.
        assert_eq!(
            AccountType::Revenue.balance_change(Decimal::ZERO, dec!(100.00)),
            dec!(100.00)
        );
        assert_eq!(
            AccountType::Revenue.balance_change(dec!(100.00), Decimal::ZERO),
            dec!(-100.00)
        );
    }

    #[test]
    fn test_entry_totals_balanced() {
        let totals = EntryTotals::new(dec!(52.00), dec!(52.00));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), Decimal::ZERO);
    }

    #[test]
    fn test_entry_totals_unbalanced() {
        let totals = EntryTotals::new(dec!(100), dec!(99));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(1));
    }
}
