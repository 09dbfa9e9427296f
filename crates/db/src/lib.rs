//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository abstractions for data access
//! - Database migrations
//!
//! The repositories are the transactional coordinator of the system: each
//! business event (post a journal entry, create an order, apply a stock
//! movement, receive a purchase) opens one database transaction, threads it
//! through every sub-step, and commits or rolls back as a unit.

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountRepository, ActivityLogRepository, CustomerRepository, JournalRepository,
    PurchaseRepository, SalesRepository, StockRepository, SupplierRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
