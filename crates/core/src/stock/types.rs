//! Stock domain types.

use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ProductId, UserId, WarehouseId};

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Goods entering a warehouse.
    In,
    /// Goods leaving a warehouse.
    Out,
    /// Goods moving between two warehouses.
    Transfer,
    /// Absolute correction of a warehouse quantity.
    Adjustment,
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Transfer => "TRANSFER",
            Self::Adjustment => "ADJUSTMENT",
        };
        write!(f, "{s}")
    }
}

/// Input for applying a stock movement.
#[derive(Debug, Clone)]
pub struct StockMovementInput {
    /// The product being moved.
    pub product_id: ProductId,
    /// Movement kind.
    pub movement_type: MovementType,
    /// Units moved; must be positive. For ADJUSTMENT this is the absolute
    /// quantity the stock row is set to.
    pub quantity: i32,
    /// Source warehouse (OUT, TRANSFER).
    pub from_warehouse_id: Option<WarehouseId>,
    /// Destination warehouse (IN, TRANSFER, ADJUSTMENT).
    pub to_warehouse_id: Option<WarehouseId>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// The user recording the movement.
    pub created_by: UserId,
}

/// One planned write to a stock row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockWrite {
    /// The warehouse whose row changes.
    pub warehouse_id: WarehouseId,
    /// The quantity the row ends up with.
    pub new_quantity: i32,
}

/// The full set of stock-row writes a movement implies.
///
/// A plan is produced only after every precondition has been checked, so
/// applying it cannot leave a row negative or a transfer half-done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementPlan {
    /// Writes to apply, in order.
    pub writes: Vec<StockWrite>,
}
