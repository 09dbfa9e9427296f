//! Balance delta rules for order creation.

use rust_decimal::Decimal;

use crate::orders::types::PaymentMethod;

/// Receivable delta a sales order applies to its customer.
///
/// Only credit sales accrue; cash-like sales settle immediately and leave
/// the customer balance alone.
#[must_use]
pub fn sales_receivable_delta(payment_method: PaymentMethod, grand_total: Decimal) -> Decimal {
    if payment_method.is_credit() {
        grand_total
    } else {
        Decimal::ZERO
    }
}

/// Payable delta a purchase order applies to its supplier.
///
/// Purchases accrue unconditionally, regardless of payment terms. The
/// asymmetry with sales is intentional: purchases are assumed on account.
#[must_use]
pub fn purchase_payable_delta(grand_total: Decimal) -> Decimal {
    grand_total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(PaymentMethod::Cash, dec!(0))]
    #[case(PaymentMethod::Card, dec!(0))]
    #[case(PaymentMethod::Transfer, dec!(0))]
    #[case(PaymentMethod::Credit, dec!(52.00))]
    fn test_sales_delta(#[case] method: PaymentMethod, #[case] expected: Decimal) {
        assert_eq!(sales_receivable_delta(method, dec!(52.00)), expected);
    }

    #[test]
    fn test_purchase_delta_is_unconditional() {
        assert_eq!(purchase_payable_delta(dec!(80.00)), dec!(80.00));
    }
}
