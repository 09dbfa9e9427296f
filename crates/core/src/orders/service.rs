//! Order pricing, totals, derived postings, and settlement arithmetic.

use rust_decimal::Decimal;

use super::error::OrderError;
use super::types::{
    OrderItemInput, OrderStatus, OrderTotals, PaymentMethod, PostingAccounts, PricedItem,
    ProductInfo, Settlement,
};
use crate::ledger::types::JournalLineInput;
use stockbook_shared::types::{DocumentNumber, ProductId};

/// Order service: pure calculations shared by the sales and purchase flows.
pub struct OrderService;

impl OrderService {
    /// Prices sales items. The unit price is always the product's selling
    /// price; caller-supplied prices are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty item list, a non-positive quantity, or
    /// an unknown/inactive product.
    pub fn price_sales_items<P>(
        items: &[OrderItemInput],
        product_lookup: P,
    ) -> Result<Vec<PricedItem>, OrderError>
    where
        P: Fn(ProductId) -> Result<ProductInfo, OrderError>,
    {
        Self::price_items(items, product_lookup, |_, product| product.selling_price)
    }

    /// Prices purchase items. The unit price is the caller-supplied price
    /// when present, otherwise the product's cost price.
    ///
    /// # Errors
    ///
    /// Same failure modes as `price_sales_items`, plus a negative
    /// caller-supplied price.
    pub fn price_purchase_items<P>(
        items: &[OrderItemInput],
        product_lookup: P,
    ) -> Result<Vec<PricedItem>, OrderError>
    where
        P: Fn(ProductId) -> Result<ProductInfo, OrderError>,
    {
        Self::price_items(items, product_lookup, |item, product| {
            item.unit_price.unwrap_or(product.cost_price)
        })
    }

    fn price_items<P, F>(
        items: &[OrderItemInput],
        product_lookup: P,
        unit_price: F,
    ) -> Result<Vec<PricedItem>, OrderError>
    where
        P: Fn(ProductId) -> Result<ProductInfo, OrderError>,
        F: Fn(&OrderItemInput, &ProductInfo) -> Decimal,
    {
        if items.is_empty() {
            return Err(OrderError::NoItems);
        }

        let mut priced = Vec::with_capacity(items.len());
        for item in items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidQuantity(item.product_id.into_inner()));
            }

            let product = product_lookup(item.product_id)?;
            if !product.is_active {
                return Err(OrderError::ProductInactive(item.product_id.into_inner()));
            }

            let price = unit_price(item, &product);
            if price < Decimal::ZERO {
                return Err(OrderError::NegativeUnitPrice(item.product_id.into_inner()));
            }

            priced.push(PricedItem {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: price,
                total: Decimal::from(item.quantity) * price,
            });
        }

        Ok(priced)
    }

    /// Computes order totals: `grand_total = total_amount - discount + tax`.
    ///
    /// Discount and tax default to zero when absent.
    ///
    /// # Errors
    ///
    /// Returns an error if discount or tax is negative.
    pub fn compute_totals(
        items: &[PricedItem],
        discount: Option<Decimal>,
        tax: Option<Decimal>,
    ) -> Result<OrderTotals, OrderError> {
        let discount = discount.unwrap_or(Decimal::ZERO);
        let tax = tax.unwrap_or(Decimal::ZERO);

        if discount < Decimal::ZERO {
            return Err(OrderError::NegativeDiscount);
        }
        if tax < Decimal::ZERO {
            return Err(OrderError::NegativeTax);
        }

        let total_amount: Decimal = items.iter().map(|i| i.total).sum();

        Ok(OrderTotals {
            total_amount,
            discount,
            tax,
            grand_total: total_amount - discount + tax,
        })
    }

    /// Builds the journal lines derived from a sales order.
    ///
    /// Cash-like sales debit Cash/Bank; credit sales debit Accounts
    /// Receivable, matching the customer-balance accrual. Sales Revenue is
    /// credited either way, so the entry always balances at `grand_total`.
    #[must_use]
    pub fn sales_journal_lines(
        grand_total: Decimal,
        payment_method: PaymentMethod,
        accounts: &PostingAccounts,
        order_number: &DocumentNumber,
    ) -> Vec<JournalLineInput> {
        let (debit_account, debit_note) = if payment_method.is_credit() {
            (accounts.receivable, "Receivable from credit sale")
        } else {
            (accounts.cash, "Cash received from sale")
        };

        vec![
            JournalLineInput::debit(
                debit_account,
                grand_total,
                Some(format!("{debit_note} {order_number}")),
            ),
            JournalLineInput::credit(
                accounts.sales_revenue,
                grand_total,
                Some(format!("Sales revenue {order_number}")),
            ),
        ]
    }

    /// Builds the accrual journal lines derived from a purchase order:
    /// debit Inventory, credit Accounts Payable for `grand_total`.
    #[must_use]
    pub fn purchase_journal_lines(
        grand_total: Decimal,
        accounts: &PostingAccounts,
        order_number: &DocumentNumber,
    ) -> Vec<JournalLineInput> {
        vec![
            JournalLineInput::debit(
                accounts.inventory,
                grand_total,
                Some(format!("Inventory from purchase {order_number}")),
            ),
            JournalLineInput::credit(
                accounts.payable,
                grand_total,
                Some(format!("Payable to supplier {order_number}")),
            ),
        ]
    }

    /// Initial settlement state of a new sales order.
    ///
    /// Cash-like sales are settled on the spot; credit sales open with the
    /// full grand total outstanding.
    #[must_use]
    pub fn initial_sales_settlement(
        payment_method: PaymentMethod,
        grand_total: Decimal,
    ) -> Settlement {
        if payment_method.is_credit() {
            Settlement {
                paid_amount: Decimal::ZERO,
                balance: grand_total,
                status: OrderStatus::Pending,
            }
        } else {
            Settlement {
                paid_amount: grand_total,
                balance: Decimal::ZERO,
                status: OrderStatus::Completed,
            }
        }
    }

    /// Initial settlement state of a new purchase order: nothing paid.
    #[must_use]
    pub fn initial_purchase_settlement(grand_total: Decimal) -> Settlement {
        Settlement {
            paid_amount: Decimal::ZERO,
            balance: grand_total,
            status: OrderStatus::Pending,
        }
    }

    /// Recomputes the outstanding balance after a payment update.
    ///
    /// One rule for both order kinds: `balance = grand_total - paid_amount`.
    ///
    /// # Errors
    ///
    /// Returns an error if `paid_amount` is negative.
    pub fn settle(grand_total: Decimal, paid_amount: Decimal) -> Result<Decimal, OrderError> {
        if paid_amount < Decimal::ZERO {
            return Err(OrderError::NegativePaidAmount);
        }
        Ok(grand_total - paid_amount)
    }
}
