//! Property tests for ledger resolution and account polarity.

use proptest::prelude::*;
use rust_decimal::Decimal;
use stockbook_shared::types::{AccountId, UserId};

use super::service::{AccountInfo, LedgerService};
use super::types::{AccountType, JournalLineInput, JournalType, PostJournalEntryInput};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn account_type_strategy() -> impl Strategy<Value = AccountType> {
    prop_oneof![
        Just(AccountType::Asset),
        Just(AccountType::Liability),
        Just(AccountType::Equity),
        Just(AccountType::Revenue),
        Just(AccountType::Expense),
    ]
}

fn make_input(lines: Vec<JournalLineInput>) -> PostJournalEntryInput {
    PostJournalEntryInput {
        date: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        description: "prop entry".to_string(),
        entry_type: JournalType::Journal,
        lines,
        reference_id: None,
        created_by: UserId::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Debit-normal and credit-normal changes are exact mirrors.
    #[test]
    fn prop_polarity_mirror(debit in amount_strategy(), credit in amount_strategy()) {
        let debit_normal = AccountType::Asset.balance_change(debit, credit);
        let credit_normal = AccountType::Revenue.balance_change(debit, credit);
        prop_assert_eq!(debit_normal, -credit_normal);
    }

    /// All five account types agree on the magnitude of a one-sided line.
    #[test]
    fn prop_one_sided_magnitude(amount in amount_strategy(), ty in account_type_strategy()) {
        let from_debit = ty.balance_change(amount, Decimal::ZERO);
        let from_credit = ty.balance_change(Decimal::ZERO, amount);
        prop_assert_eq!(from_debit.abs(), amount);
        prop_assert_eq!(from_credit.abs(), amount);
        prop_assert_eq!(from_debit, -from_credit);
    }

    /// When every account is the same type, resolved balance changes sum to
    /// zero for any balanced entry: what one account gains, another loses.
    #[test]
    fn prop_same_type_changes_cancel(
        amounts in prop::collection::vec(amount_strategy(), 1..8),
        ty in account_type_strategy(),
    ) {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<JournalLineInput> = amounts
            .iter()
            .map(|&a| JournalLineInput::debit(AccountId::new(), a, None))
            .collect();
        lines.push(JournalLineInput::credit(AccountId::new(), total, None));

        let input = make_input(lines);
        let lookup = move |id: AccountId| {
            Ok(AccountInfo { id, account_type: ty, is_active: true })
        };

        let (resolved, totals) = LedgerService::validate_and_resolve(&input, lookup).unwrap();
        let net: Decimal = resolved.iter().map(|l| l.balance_change).sum();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(net, Decimal::ZERO);
    }

    /// Resolution preserves line order and amounts verbatim.
    #[test]
    fn prop_resolution_preserves_lines(amounts in prop::collection::vec(amount_strategy(), 1..8)) {
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<JournalLineInput> = amounts
            .iter()
            .map(|&a| JournalLineInput::debit(AccountId::new(), a, None))
            .collect();
        lines.push(JournalLineInput::credit(AccountId::new(), total, None));
        let input = make_input(lines.clone());

        let lookup = |id: AccountId| {
            Ok(AccountInfo { id, account_type: AccountType::Asset, is_active: true })
        };

        let (resolved, _) = LedgerService::validate_and_resolve(&input, lookup).unwrap();
        prop_assert_eq!(resolved.len(), lines.len());
        for (line, res) in lines.iter().zip(&resolved) {
            prop_assert_eq!(line.account_id, res.account_id);
            prop_assert_eq!(line.debit, res.debit);
            prop_assert_eq!(line.credit, res.credit);
        }
    }
}
