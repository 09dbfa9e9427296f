//! Property tests for journal line validation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use stockbook_shared::types::AccountId;

use super::error::LedgerError;
use super::types::JournalLineInput;
use super::validation::validate_lines;

/// Strategy for positive money amounts (0.01 .. 1,000,000.00).
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a list of positive amounts.
fn amounts_strategy(max_len: usize) -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(amount_strategy(), 1..=max_len)
}

/// Builds a balanced entry: one debit line per amount plus a single credit
/// line for the total.
fn balanced_lines(amounts: &[Decimal]) -> Vec<JournalLineInput> {
    let total: Decimal = amounts.iter().copied().sum();
    let mut lines: Vec<JournalLineInput> = amounts
        .iter()
        .map(|&a| JournalLineInput::debit(AccountId::new(), a, None))
        .collect();
    lines.push(JournalLineInput::credit(AccountId::new(), total, None));
    lines
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any mirrored debit/credit set validates and totals exactly.
    #[test]
    fn prop_balanced_lines_validate(amounts in amounts_strategy(10)) {
        let lines = balanced_lines(&amounts);
        let totals = validate_lines(&lines).unwrap();

        let expected: Decimal = amounts.iter().copied().sum();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit, expected);
        prop_assert_eq!(totals.credit, expected);
    }

    /// Perturbing the credit side by any nonzero delta breaks the balance.
    #[test]
    fn prop_perturbed_credit_is_unbalanced(
        amounts in amounts_strategy(10),
        delta in amount_strategy(),
    ) {
        let mut lines = balanced_lines(&amounts);
        let last = lines.len() - 1;
        lines[last].credit += delta;

        let result = validate_lines(&lines);
        prop_assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
    }

    /// A negative amount on either side is always rejected.
    #[test]
    fn prop_negative_amount_rejected(amounts in amounts_strategy(5), victim in 0usize..5) {
        let mut lines = balanced_lines(&amounts);
        let victim = victim % lines.len();
        if lines[victim].debit > Decimal::ZERO {
            lines[victim].debit = -lines[victim].debit;
        } else {
            lines[victim].credit = -lines[victim].credit;
        }

        let result = validate_lines(&lines);
        prop_assert!(matches!(result, Err(LedgerError::NegativeAmount)));
    }

    /// Validation is a pure check: it never changes the input slice, so
    /// re-validating gives the same totals.
    #[test]
    fn prop_validation_deterministic(amounts in amounts_strategy(10)) {
        let lines = balanced_lines(&amounts);
        let first = validate_lines(&lines).unwrap();
        let second = validate_lines(&lines).unwrap();
        prop_assert_eq!(first.debit, second.debit);
        prop_assert_eq!(first.credit, second.credit);
    }
}
