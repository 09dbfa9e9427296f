//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Ledger posting configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Chart-of-accounts codes the document engines post against.
///
/// These accounts must exist before any sale or purchase can be recorded;
/// `verify_posting_accounts` in the db layer checks them at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Cash/Bank account code, debited on cash-like sales.
    #[serde(default = "default_cash_account")]
    pub cash_account_code: String,
    /// Accounts Receivable code, debited on credit sales.
    #[serde(default = "default_receivable_account")]
    pub receivable_account_code: String,
    /// Inventory account code, debited on purchase accrual.
    #[serde(default = "default_inventory_account")]
    pub inventory_account_code: String,
    /// Accounts Payable code, credited on purchase accrual.
    #[serde(default = "default_payable_account")]
    pub payable_account_code: String,
    /// Sales Revenue code, credited on every sale.
    #[serde(default = "default_sales_revenue_account")]
    pub sales_revenue_account_code: String,
}

fn default_cash_account() -> String {
    "1100".to_string()
}

fn default_receivable_account() -> String {
    "1200".to_string()
}

fn default_inventory_account() -> String {
    "1300".to_string()
}

fn default_payable_account() -> String {
    "2100".to_string()
}

fn default_sales_revenue_account() -> String {
    "4000".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cash_account_code: default_cash_account(),
            receivable_account_code: default_receivable_account(),
            inventory_account_code: default_inventory_account(),
            payable_account_code: default_payable_account(),
            sales_revenue_account_code: default_sales_revenue_account(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("STOCKBOOK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
