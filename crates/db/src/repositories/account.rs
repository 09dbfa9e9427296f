//! Account repository for chart of accounts database operations.
//!
//! Account balances are never written here: they are mutated exclusively by
//! journal posting (see `repositories::journal`), inside the posting
//! transaction.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{accounts, sea_orm_active_enums::AccountType};
use chrono::Utc;
use rust_decimal::Decimal;
use stockbook_core::orders::{OrderError, PostingAccounts};
use stockbook_shared::config::LedgerConfig;
use stockbook_shared::types::AccountId;

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(Uuid),

    /// Parent chain would form a cycle.
    #[error("Account {0} cannot be its own ancestor")]
    ParentCycle(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// A configured posting account is missing.
    #[error("Posting account with code {0} does not exist")]
    PostingAccountMissing(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Unique, sortable account code (e.g. "1100").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: stockbook_core::ledger::AccountType,
    /// Optional parent account.
    pub parent_id: Option<AccountId>,
}

/// Input for updating an account.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// New name.
    pub name: Option<String>,
    /// New parent account.
    pub parent_id: Option<AccountId>,
    /// Activate or deactivate.
    pub active: Option<bool>,
}

/// Account repository for chart of accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account with a zero opening balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is taken or the parent does not exist.
    pub async fn create(&self, input: CreateAccountInput) -> Result<accounts::Model, AccountError> {
        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(input.code.clone()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        if let Some(parent_id) = input.parent_id {
            accounts::Entity::find_by_id(parent_id.into_inner())
                .one(&self.db)
                .await?
                .ok_or(AccountError::ParentNotFound(parent_id.into_inner()))?;
        }

        let now = Utc::now().into();
        let account = accounts::ActiveModel {
            id: Set(AccountId::new().into_inner()),
            code: Set(input.code),
            name: Set(input.name),
            account_type: Set(AccountType::from(input.account_type)),
            balance: Set(Decimal::ZERO),
            active: Set(true),
            parent_id: Set(input.parent_id.map(AccountId::into_inner)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        Ok(account.insert(&self.db).await?)
    }

    /// Gets an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn get(&self, id: AccountId) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .ok_or(AccountError::NotFound(id.into_inner()))
    }

    /// Gets an account by its code.
    ///
    /// # Errors
    ///
    /// Returns an error if no account carries the code.
    pub async fn get_by_code(&self, code: &str) -> Result<accounts::Model, AccountError> {
        accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .ok_or_else(|| AccountError::PostingAccountMissing(code.to_string()))
    }

    /// Lists accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, active_only: bool) -> Result<Vec<accounts::Model>, AccountError> {
        let mut query = accounts::Entity::find();
        if active_only {
            query = query.filter(accounts::Column::Active.eq(true));
        }
        Ok(query.order_by_asc(accounts::Column::Code).all(&self.db).await?)
    }

    /// Updates an account's name, parent, or active flag.
    ///
    /// The account type is deliberately not updatable: flipping polarity
    /// would silently invert the meaning of the posted balance.
    ///
    /// # Errors
    ///
    /// Returns an error if the account or new parent is missing, or the new
    /// parent chain would contain the account itself.
    pub async fn update(
        &self,
        id: AccountId,
        input: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = self.get(id).await?;

        if let Some(parent_id) = input.parent_id {
            self.ensure_no_cycle(id, parent_id).await?;
        }

        let mut active_model: accounts::ActiveModel = account.into();
        if let Some(name) = input.name {
            active_model.name = Set(name);
        }
        if let Some(parent_id) = input.parent_id {
            active_model.parent_id = Set(Some(parent_id.into_inner()));
        }
        if let Some(active) = input.active {
            active_model.active = Set(active);
        }
        active_model.updated_at = Set(Utc::now().into());

        Ok(active_model.update(&self.db).await?)
    }

    /// Soft-deactivates an account. Accounts referenced by journal lines are
    /// kept forever; deactivation only blocks new postings.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub async fn deactivate(&self, id: AccountId) -> Result<accounts::Model, AccountError> {
        self.update(
            id,
            UpdateAccountInput {
                active: Some(false),
                ..UpdateAccountInput::default()
            },
        )
        .await
    }

    /// Verifies that every configured posting account exists, returning
    /// their resolved IDs.
    ///
    /// Called at startup so a misconfigured chart of accounts fails fast
    /// instead of failing the first sale.
    ///
    /// # Errors
    ///
    /// Returns `PostingAccountMissing` naming the first absent code.
    pub async fn verify_posting_accounts(
        &self,
        config: &LedgerConfig,
    ) -> Result<PostingAccounts, AccountError> {
        Ok(PostingAccounts {
            cash: self.resolve_code(&config.cash_account_code).await?,
            receivable: self.resolve_code(&config.receivable_account_code).await?,
            inventory: self.resolve_code(&config.inventory_account_code).await?,
            payable: self.resolve_code(&config.payable_account_code).await?,
            sales_revenue: self.resolve_code(&config.sales_revenue_account_code).await?,
        })
    }

    async fn resolve_code(&self, code: &str) -> Result<AccountId, AccountError> {
        accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?
            .map(|account| AccountId::from_uuid(account.id))
            .ok_or_else(|| AccountError::PostingAccountMissing(code.to_string()))
    }

    /// Walks the ancestor chain from `parent_id` and rejects the update if
    /// it reaches `id`.
    async fn ensure_no_cycle(
        &self,
        id: AccountId,
        parent_id: AccountId,
    ) -> Result<(), AccountError> {
        let mut current = Some(parent_id.into_inner());
        while let Some(ancestor_id) = current {
            if ancestor_id == id.into_inner() {
                return Err(AccountError::ParentCycle(id.into_inner()));
            }
            let ancestor = accounts::Entity::find_by_id(ancestor_id)
                .one(&self.db)
                .await?
                .ok_or(AccountError::ParentNotFound(ancestor_id))?;
            current = ancestor.parent_id;
        }
        Ok(())
    }
}

/// Resolves the configured posting accounts inside an order transaction.
///
/// Fails closed with `PostingAccountMissing` so a sale is never persisted
/// without its derived journal entry.
pub(crate) async fn find_posting_accounts(
    txn: &DatabaseTransaction,
    config: &LedgerConfig,
) -> Result<PostingAccounts, OrderError> {
    async fn resolve(
        txn: &DatabaseTransaction,
        code: &str,
    ) -> Result<AccountId, OrderError> {
        accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(txn)
            .await
            .map_err(|e| OrderError::Database(e.to_string()))?
            .map(|account| AccountId::from_uuid(account.id))
            .ok_or_else(|| OrderError::PostingAccountMissing(code.to_string()))
    }

    Ok(PostingAccounts {
        cash: resolve(txn, &config.cash_account_code).await?,
        receivable: resolve(txn, &config.receivable_account_code).await?,
        inventory: resolve(txn, &config.inventory_account_code).await?,
        payable: resolve(txn, &config.payable_account_code).await?,
        sales_revenue: resolve(txn, &config.sales_revenue_account_code).await?,
    })
}
