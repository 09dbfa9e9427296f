//! Double-entry journal posting logic.
//!
//! This module implements the core ledger functionality:
//! - Journal line and entry input types
//! - Business rule validation (balance, line shape)
//! - Account polarity and balance-change resolution
//! - Error types for ledger operations
//! - Ledger service for entry validation and resolution

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod validation_props;

pub use error::LedgerError;
pub use service::{AccountInfo, LedgerService};
pub use types::{
    AccountType, EntryTotals, JournalLineInput, JournalType, PostJournalEntryInput, ResolvedLine,
};
pub use validation::validate_lines;
