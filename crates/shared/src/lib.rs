//! Shared types, errors, and configuration for Stockbook.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Money formatting with decimal precision
//! - The document numbering convention (JE-/SO-/PO- prefixes)
//! - Pagination types for list queries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
