//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.
//! They also own the transactional boundary: every multi-entity business
//! event runs inside a single database transaction opened here.

pub mod account;
pub mod activity;
pub mod journal;
pub mod party;
pub mod purchase;
pub mod sales;
pub mod sequence;
pub mod stock;

pub use account::{AccountRepository, CreateAccountInput, UpdateAccountInput};
pub use activity::ActivityLogRepository;
pub use journal::{JournalEntryFilter, JournalEntryWithLines, JournalRepository};
pub use party::{
    CreateCustomerInput, CreateSupplierInput, CustomerRepository, SupplierRepository,
    UpdateCustomerInput, UpdateSupplierInput,
};
pub use purchase::{PurchaseOrderFilter, PurchaseOrderWithItems, PurchaseRepository};
pub use sales::{SalesOrderFilter, SalesOrderWithItems, SalesRepository, UpdateOrderInput};
pub use stock::{MovementFilter, StockRepository};
