//! Business rule validation for journal entries.

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryTotals, JournalLineInput};

/// Validates a set of journal lines and returns their totals.
///
/// Rules:
/// - at least 2 lines
/// - no negative amounts
/// - each line carries exactly one nonzero side
/// - total debits equal total credits, by exact decimal comparison
///
/// # Errors
///
/// Returns an error if the lines violate any of the rules above.
pub fn validate_lines(lines: &[JournalLineInput]) -> Result<EntryTotals, LedgerError> {
    if lines.len() < 2 {
        return Err(LedgerError::InsufficientLines);
    }

    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;

    for line in lines {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount);
        }
        if line.debit > Decimal::ZERO && line.credit > Decimal::ZERO {
            return Err(LedgerError::BothSidesSet);
        }
        if line.debit == Decimal::ZERO && line.credit == Decimal::ZERO {
            return Err(LedgerError::EmptyLine);
        }

        total_debit += line.debit;
        total_credit += line.credit;
    }

    let totals = EntryTotals::new(total_debit, total_credit);
    if !totals.is_balanced {
        return Err(LedgerError::Unbalanced {
            debit: totals.debit,
            credit: totals.credit,
        });
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stockbook_shared::types::AccountId;

    fn debit(amount: Decimal) -> JournalLineInput {
        JournalLineInput::debit(AccountId::new(), amount, None)
    }

    fn credit(amount: Decimal) -> JournalLineInput {
        JournalLineInput::credit(AccountId::new(), amount, None)
    }

    #[test]
    fn test_balanced_lines() {
        let totals = validate_lines(&[debit(dec!(100.00)), credit(dec!(100.00))]).unwrap();
        assert!(totals.is_balanced);
        assert_eq!(totals.debit, dec!(100.00));
    }

    #[test]
    fn test_unbalanced_lines() {
        let result = validate_lines(&[debit(dec!(100)), credit(dec!(99))]);
        assert!(matches!(result, Err(LedgerError::Unbalanced { .. })));
    }

    #[test]
    fn test_single_line_rejected() {
        let result = validate_lines(&[debit(dec!(100))]);
        assert!(matches!(result, Err(LedgerError::InsufficientLines)));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let result = validate_lines(&[debit(dec!(-100)), credit(dec!(-100))]);
        assert!(matches!(result, Err(LedgerError::NegativeAmount)));
    }

    #[test]
    fn test_both_sides_set_rejected() {
        let mut line = debit(dec!(100));
        line.credit = dec!(100);
        let result = validate_lines(&[line, credit(dec!(0))]);
        assert!(matches!(result, Err(LedgerError::BothSidesSet)));
    }

    #[test]
    fn test_empty_line_rejected() {
        let result = validate_lines(&[debit(dec!(100)), credit(dec!(100)), debit(dec!(0))]);
        assert!(matches!(result, Err(LedgerError::EmptyLine)));
    }

    #[test]
    fn test_exact_decimal_comparison() {
        // 0.1 + 0.2 == 0.3 holds for decimals; no epsilon tolerance involved.
        let totals =
            validate_lines(&[debit(dec!(0.1)), debit(dec!(0.2)), credit(dec!(0.3))]).unwrap();
        assert!(totals.is_balanced);
    }
}
