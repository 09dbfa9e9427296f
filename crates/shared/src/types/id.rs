//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `ProductId` where a
//! `WarehouseId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for a user.");
typed_id!(AccountId, "Unique identifier for a chart of accounts entry.");
typed_id!(JournalEntryId, "Unique identifier for a journal entry.");
typed_id!(JournalLineId, "Unique identifier for a journal entry line.");
typed_id!(CustomerId, "Unique identifier for a customer.");
typed_id!(SupplierId, "Unique identifier for a supplier.");
typed_id!(CategoryId, "Unique identifier for a product category.");
typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(WarehouseId, "Unique identifier for a warehouse.");
typed_id!(StockMovementId, "Unique identifier for a stock movement.");
typed_id!(SalesOrderId, "Unique identifier for a sales order.");
typed_id!(PurchaseOrderId, "Unique identifier for a purchase order.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_ids_are_unique() {
        let a = ProductId::new();
        let b = ProductId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_round_trip() {
        let id = AccountId::new();
        let parsed = AccountId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_id_from_uuid() {
        let uuid = Uuid::now_v7();
        let id = WarehouseId::from_uuid(uuid);
        assert_eq!(id.into_inner(), uuid);
    }
}
