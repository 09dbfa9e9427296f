//! Order domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{AccountId, CustomerId, ProductId, SupplierId, UserId, WarehouseId};

/// Payment method on a sales order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMethod {
    /// Cash on the spot.
    Cash,
    /// Card payment, settled immediately.
    Card,
    /// Bank transfer, settled immediately.
    Transfer,
    /// On account; accrues to the customer's receivable balance.
    Credit,
}

impl PaymentMethod {
    /// Returns true when payment is deferred to the customer's account.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(self, Self::Credit)
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting settlement (sales) or receipt (purchases).
    Pending,
    /// Fully settled sales order.
    Completed,
    /// Goods received into a warehouse (purchases).
    Received,
    /// Cancelled before completion.
    Cancelled,
}

/// A single requested order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    /// The product being ordered.
    pub product_id: ProductId,
    /// Units ordered (must be positive).
    pub quantity: i32,
    /// Caller-supplied unit price. Honored for purchases only; sales always
    /// use the product's selling price.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub unit_price: Option<Decimal>,
}

/// Product attributes needed to price an order line.
#[derive(Debug, Clone)]
pub struct ProductInfo {
    /// The product ID.
    pub id: ProductId,
    /// Price charged to customers.
    pub selling_price: Decimal,
    /// Price paid to suppliers.
    pub cost_price: Decimal,
    /// Whether the product is active.
    pub is_active: bool,
}

/// An order line with its price snapshotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedItem {
    /// The product.
    pub product_id: ProductId,
    /// Units ordered.
    pub quantity: i32,
    /// Unit price at order time.
    pub unit_price: Decimal,
    /// Line total (`quantity * unit_price`).
    pub total: Decimal,
}

/// Monetary totals of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub total_amount: Decimal,
    /// Discount applied to the subtotal.
    pub discount: Decimal,
    /// Tax added on top.
    pub tax: Decimal,
    /// `total_amount - discount + tax`.
    pub grand_total: Decimal,
}

/// Initial settlement state of a freshly created order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    /// Amount already paid.
    pub paid_amount: Decimal,
    /// Amount still owed (`grand_total - paid_amount`).
    pub balance: Decimal,
    /// Resulting order status.
    pub status: OrderStatus,
}

/// Input for creating a sales order.
#[derive(Debug, Clone)]
pub struct CreateSalesOrderInput {
    /// The customer buying.
    pub customer_id: CustomerId,
    /// Requested lines (must not be empty).
    pub items: Vec<OrderItemInput>,
    /// Discount on the subtotal; defaults to zero.
    pub discount: Option<Decimal>,
    /// Tax on top; defaults to zero.
    pub tax: Option<Decimal>,
    /// How the customer pays.
    pub payment_method: PaymentMethod,
    /// Warehouse to fulfill from; when set, stock is reduced per line.
    pub warehouse_id: Option<WarehouseId>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The user recording the sale.
    pub created_by: UserId,
}

/// Input for creating a purchase order.
#[derive(Debug, Clone)]
pub struct CreatePurchaseOrderInput {
    /// The supplier selling.
    pub supplier_id: SupplierId,
    /// Requested lines (must not be empty).
    pub items: Vec<OrderItemInput>,
    /// Discount on the subtotal; defaults to zero.
    pub discount: Option<Decimal>,
    /// Tax on top; defaults to zero.
    pub tax: Option<Decimal>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The user recording the purchase.
    pub created_by: UserId,
}

/// The chart-of-accounts rows the document engines post against, resolved
/// from their configured codes at operation time.
#[derive(Debug, Clone, Copy)]
pub struct PostingAccounts {
    /// Cash/Bank, debited on cash-like sales.
    pub cash: AccountId,
    /// Accounts Receivable, debited on credit sales.
    pub receivable: AccountId,
    /// Inventory, debited on purchase accrual.
    pub inventory: AccountId,
    /// Accounts Payable, credited on purchase accrual.
    pub payable: AccountId,
    /// Sales Revenue, credited on every sale.
    pub sales_revenue: AccountId,
}
