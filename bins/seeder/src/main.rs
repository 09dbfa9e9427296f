//! Database seeder for Stockbook development and testing.
//!
//! Seeds the chart of accounts and a default warehouse for local
//! development, then verifies the configured posting accounts resolve.
//! Document sequence counters are created by the initial migration.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use stockbook_db::entities::{accounts, sea_orm_active_enums::AccountType, warehouses};
use stockbook_db::repositories::AccountRepository;
use stockbook_shared::config::{AppConfig, LedgerConfig};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Chart of accounts seeded for a fresh installation.
///
/// Codes 1100, 1200, 1300, 2100, and 4000 back the configured posting
/// accounts; the rest mirror a typical small-business chart.
const CHART_OF_ACCOUNTS: &[(&str, &str, AccountType)] = &[
    // Assets (1000-1999)
    ("1000", "Assets", AccountType::Asset),
    ("1100", "Cash and Bank", AccountType::Asset),
    ("1200", "Accounts Receivable", AccountType::Asset),
    ("1300", "Inventory", AccountType::Asset),
    ("1400", "Prepaid Expenses", AccountType::Asset),
    ("1500", "Fixed Assets", AccountType::Asset),
    // Liabilities (2000-2999)
    ("2000", "Liabilities", AccountType::Liability),
    ("2100", "Accounts Payable", AccountType::Liability),
    ("2200", "Short-term Loans", AccountType::Liability),
    ("2400", "Accrued Expenses", AccountType::Liability),
    // Equity (3000-3999)
    ("3000", "Equity", AccountType::Equity),
    ("3100", "Owner's Equity", AccountType::Equity),
    ("3200", "Retained Earnings", AccountType::Equity),
    // Revenue (4000-4999)
    ("4000", "Revenue", AccountType::Revenue),
    ("4100", "Sales Revenue", AccountType::Revenue),
    ("4900", "Other Income", AccountType::Revenue),
    // Expenses (5000-5999)
    ("5000", "Expenses", AccountType::Expense),
    ("5100", "Cost of Goods Sold", AccountType::Expense),
    ("5200", "Salaries and Wages", AccountType::Expense),
    ("5300", "Rent Expense", AccountType::Expense),
    ("5400", "Utilities Expense", AccountType::Expense),
    ("5900", "Miscellaneous Expenses", AccountType::Expense),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (database_url, ledger_config) = match AppConfig::load() {
        Ok(config) => (config.database.url, config.ledger),
        Err(_) => (
            std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set when no config file is present")?,
            LedgerConfig::default(),
        ),
    };

    println!("Connecting to database...");
    let db = stockbook_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding chart of accounts...");
    seed_accounts(&db).await?;

    println!("Seeding default warehouse...");
    seed_default_warehouse(&db).await?;

    println!("Verifying posting accounts...");
    AccountRepository::new(db)
        .verify_posting_accounts(&ledger_config)
        .await
        .context("Posting accounts missing after seeding")?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_accounts(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (code, name, account_type) in CHART_OF_ACCOUNTS {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(*code))
            .one(db)
            .await?;
        if existing.is_some() {
            continue;
        }

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set((*code).to_string()),
            name: Set((*name).to_string()),
            account_type: Set(account_type.clone()),
            balance: Set(Decimal::ZERO),
            active: Set(true),
            parent_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        account
            .insert(db)
            .await
            .with_context(|| format!("Failed to seed account {code}"))?;
    }
    Ok(())
}

async fn seed_default_warehouse(db: &DatabaseConnection) -> anyhow::Result<()> {
    let existing = warehouses::Entity::find()
        .filter(warehouses::Column::Name.eq("Main Warehouse"))
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let now = Utc::now().into();
    let warehouse = warehouses::ActiveModel {
        id: Set(Uuid::now_v7()),
        name: Set("Main Warehouse".to_string()),
        location: Set(None),
        active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
    };
    warehouse
        .insert(db)
        .await
        .context("Failed to seed default warehouse")?;
    Ok(())
}
