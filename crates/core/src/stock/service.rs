//! Stock movement state machine.

use super::error::StockError;
use super::types::{MovementPlan, MovementType, StockMovementInput, StockWrite};
use stockbook_shared::types::WarehouseId;

/// Stock service: plans the row writes a movement implies.
pub struct StockService;

impl StockService {
    /// Validates a movement and plans its stock-row writes.
    ///
    /// `on_hand` reports the current quantity at a warehouse, `None` when no
    /// stock row exists yet. A missing row counts as zero on hand: OUT and
    /// TRANSFER from it fail as insufficient rather than silently skipping
    /// the decrement.
    ///
    /// All preconditions (warehouse presence, source sufficiency) are
    /// checked before the first write is planned, so a failed movement
    /// changes nothing.
    ///
    /// # Errors
    ///
    /// Returns a `StockError` describing the first violated rule.
    pub fn plan_movement<Q>(
        input: &StockMovementInput,
        on_hand: Q,
    ) -> Result<MovementPlan, StockError>
    where
        Q: Fn(WarehouseId) -> Option<i32>,
    {
        if input.quantity <= 0 {
            return Err(StockError::NonPositiveQuantity);
        }

        let writes = match input.movement_type {
            MovementType::In => {
                let to = input
                    .to_warehouse_id
                    .ok_or(StockError::MissingDestinationWarehouse)?;
                let current = on_hand(to).unwrap_or(0);
                vec![StockWrite {
                    warehouse_id: to,
                    new_quantity: current + input.quantity,
                }]
            }
            MovementType::Out => {
                let from = input
                    .from_warehouse_id
                    .ok_or(StockError::MissingSourceWarehouse)?;
                let available = on_hand(from).unwrap_or(0);
                if available < input.quantity {
                    return Err(StockError::InsufficientStock {
                        available,
                        requested: input.quantity,
                    });
                }
                vec![StockWrite {
                    warehouse_id: from,
                    new_quantity: available - input.quantity,
                }]
            }
            MovementType::Transfer => {
                let from = input
                    .from_warehouse_id
                    .ok_or(StockError::MissingSourceWarehouse)?;
                let to = input
                    .to_warehouse_id
                    .ok_or(StockError::MissingDestinationWarehouse)?;
                if from == to {
                    return Err(StockError::SameWarehouseTransfer);
                }

                let available = on_hand(from).unwrap_or(0);
                if available < input.quantity {
                    return Err(StockError::InsufficientStock {
                        available,
                        requested: input.quantity,
                    });
                }

                let destination = on_hand(to).unwrap_or(0);
                vec![
                    StockWrite {
                        warehouse_id: from,
                        new_quantity: available - input.quantity,
                    },
                    StockWrite {
                        warehouse_id: to,
                        new_quantity: destination + input.quantity,
                    },
                ]
            }
            MovementType::Adjustment => {
                let to = input
                    .to_warehouse_id
                    .ok_or(StockError::MissingDestinationWarehouse)?;
                // Absolute correction: the row is set, not incremented.
                vec![StockWrite {
                    warehouse_id: to,
                    new_quantity: input.quantity,
                }]
            }
        };

        Ok(MovementPlan { writes })
    }
}
