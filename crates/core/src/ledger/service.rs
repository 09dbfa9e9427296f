//! Ledger service for journal entry validation and resolution.
//!
//! This service contains pure business logic with no database dependencies.
//! It validates an entry and resolves every line against its account before
//! persistence; the db layer applies the resolved balance changes inside the
//! same transaction that inserts the entry.

use super::error::LedgerError;
use super::types::{AccountType, EntryTotals, PostJournalEntryInput, ResolvedLine};
use stockbook_shared::types::AccountId;

/// Information about an account needed for posting.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// The account type, determining balance polarity.
    pub account_type: AccountType,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Ledger service for journal entry validation and resolution.
pub struct LedgerService;

impl LedgerService {
    /// Validates and resolves a journal entry before persisting.
    ///
    /// Steps:
    /// 1. Validate line shape and exact debit/credit balance
    /// 2. Resolve each line's account (exists, active)
    /// 3. Compute the running-balance change per line from account polarity
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails or an account cannot be
    /// resolved; no state is mutated in either case.
    pub fn validate_and_resolve<A>(
        input: &PostJournalEntryInput,
        account_lookup: A,
    ) -> Result<(Vec<ResolvedLine>, EntryTotals), LedgerError>
    where
        A: Fn(AccountId) -> Result<AccountInfo, LedgerError>,
    {
        let totals = super::validation::validate_lines(&input.lines)?;

        let mut resolved = Vec::with_capacity(input.lines.len());
        for line in &input.lines {
            let account = account_lookup(line.account_id)?;
            if !account.is_active {
                return Err(LedgerError::AccountInactive(line.account_id.into_inner()));
            }

            resolved.push(ResolvedLine {
                account_id: line.account_id,
                debit: line.debit,
                credit: line.credit,
                balance_change: account.account_type.balance_change(line.debit, line.credit),
                description: line.description.clone(),
            });
        }

        Ok((resolved, totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::{JournalLineInput, JournalType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use stockbook_shared::types::UserId;

    fn make_input(lines: Vec<JournalLineInput>) -> PostJournalEntryInput {
        PostJournalEntryInput {
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            description: "Office rent".to_string(),
            entry_type: JournalType::Journal,
            lines,
            reference_id: None,
            created_by: UserId::new(),
        }
    }

    fn asset_lookup(id: AccountId) -> Result<AccountInfo, LedgerError> {
        Ok(AccountInfo {
            id,
            account_type: AccountType::Asset,
            is_active: true,
        })
    }

    #[test]
    fn test_resolve_balanced_entry() {
        let input = make_input(vec![
            JournalLineInput::debit(AccountId::new(), dec!(100.00), None),
            JournalLineInput::credit(AccountId::new(), dec!(100.00), None),
        ]);

        let (resolved, totals) = LedgerService::validate_and_resolve(&input, asset_lookup).unwrap();
        assert_eq!(resolved.len(), 2);
        assert!(totals.is_balanced);
        // Asset polarity: debit line +100, credit line -100.
        assert_eq!(resolved[0].balance_change, dec!(100.00));
        assert_eq!(resolved[1].balance_change, dec!(-100.00));
    }

    #[test]
    fn test_resolve_mixed_polarity() {
        let cash = AccountId::new();
        let revenue = AccountId::new();
        let input = make_input(vec![
            JournalLineInput::debit(cash, dec!(52.00), Some("Cash received".into())),
            JournalLineInput::credit(revenue, dec!(52.00), Some("Sales revenue".into())),
        ]);

        let lookup = move |id: AccountId| -> Result<AccountInfo, LedgerError> {
            Ok(AccountInfo {
                id,
                account_type: if id == cash {
                    AccountType::Asset
                } else {
                    AccountType::Revenue
                },
                is_active: true,
            })
        };

        let (resolved, _) = LedgerService::validate_and_resolve(&input, lookup).unwrap();
        // Both sides of the sale increase their accounts.
        assert_eq!(resolved[0].balance_change, dec!(52.00));
        assert_eq!(resolved[1].balance_change, dec!(52.00));
    }

    #[test]
    fn test_unknown_account_rejects_whole_entry() {
        let input = make_input(vec![
            JournalLineInput::debit(AccountId::new(), dec!(100), None),
            JournalLineInput::credit(AccountId::new(), dec!(100), None),
        ]);

        let lookup = |id: AccountId| -> Result<AccountInfo, LedgerError> {
            Err(LedgerError::AccountNotFound(id.into_inner()))
        };

        let result = LedgerService::validate_and_resolve(&input, lookup);
        assert!(matches!(result, Err(LedgerError::AccountNotFound(_))));
    }

    #[test]
    fn test_inactive_account_rejected() {
        let input = make_input(vec![
            JournalLineInput::debit(AccountId::new(), dec!(100), None),
            JournalLineInput::credit(AccountId::new(), dec!(100), None),
        ]);

        let lookup = |id: AccountId| {
            Ok(AccountInfo {
                id,
                account_type: AccountType::Asset,
                is_active: false,
            })
        };

        let result = LedgerService::validate_and_resolve(&input, lookup);
        assert!(matches!(result, Err(LedgerError::AccountInactive(_))));
    }

    #[test]
    fn test_validation_runs_before_account_lookup() {
        // An unbalanced entry must fail before any account is touched.
        let input = make_input(vec![
            JournalLineInput::debit(AccountId::new(), dec!(100), None),
            JournalLineInput::credit(AccountId::new(), dec!(99), None),
        ]);

        let lookup = |_id: AccountId| -> Result<AccountInfo, LedgerError> {
            panic!("account lookup must not run for an unbalanced entry")
        };

        let result = LedgerService::validate_and_resolve(&input, lookup);
        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
    }

    #[test]
    fn test_zero_sum_entry_rejected() {
        // All-zero lines are empty, not balanced.
        let input = make_input(vec![
            JournalLineInput::debit(AccountId::new(), Decimal::ZERO, None),
            JournalLineInput::credit(AccountId::new(), Decimal::ZERO, None),
        ]);

        let result = LedgerService::validate_and_resolve(&input, asset_lookup);
        assert!(matches!(result, Err(LedgerError::EmptyLine)));
    }
}
