//! Journal repository: the ledger engine's transactional coordinator.
//!
//! Posting an entry creates the entry row, its lines, and every affected
//! account's running-balance update as one database transaction. A failure
//! at any step (unbalanced lines, unknown account, storage error) rolls the
//! whole entry back; account balances never drift from the posted lines.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, Statement, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{journal_entries, journal_entry_lines, sea_orm_active_enums};
use crate::repositories::sequence;
use stockbook_core::ledger::{
    AccountInfo, JournalType, LedgerError, LedgerService, PostJournalEntryInput, ResolvedLine,
};
use stockbook_shared::types::{AccountId, DocumentKind, JournalEntryId, JournalLineId, PageRequest,
    PageResponse};

/// Filter options for listing journal entries.
#[derive(Debug, Clone, Default)]
pub struct JournalEntryFilter {
    /// Filter by entry type.
    pub entry_type: Option<JournalType>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
}

/// A journal entry with its lines.
#[derive(Debug, Clone)]
pub struct JournalEntryWithLines {
    /// Entry header.
    pub entry: journal_entries::Model,
    /// Entry lines, in posting order.
    pub lines: Vec<journal_entry_lines::Model>,
}

/// Journal repository for posting and reading entries.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
}

impl JournalRepository {
    /// Creates a new journal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Posts a journal entry.
    ///
    /// Entry creation, line creation, number allocation, and all account
    /// balance updates happen as one unit; any failure aborts all of it.
    ///
    /// # Errors
    ///
    /// Returns a `LedgerError` describing the first violated rule.
    pub async fn post_entry(
        &self,
        input: PostJournalEntryInput,
    ) -> Result<JournalEntryWithLines, LedgerError> {
        let txn = self.db.begin().await.map_err(db_err)?;
        let result = post_entry_in_txn(&txn, &input).await?;
        txn.commit().await.map_err(db_err)?;

        info!(
            entry_number = %result.entry.entry_number,
            lines = result.lines.len(),
            "journal entry posted"
        );
        crate::repositories::activity::record(
            &self.db,
            input.created_by,
            "CREATE",
            "JournalEntry",
            result.entry.id,
            Some(format!(
                "Created journal entry: {}",
                result.entry.entry_number
            )),
        )
        .await;
        Ok(result)
    }

    /// Gets a journal entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not exist.
    pub async fn get_entry(
        &self,
        id: JournalEntryId,
    ) -> Result<JournalEntryWithLines, LedgerError> {
        let entry = journal_entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::EntryNotFound(id.into_inner()))?;

        let lines = journal_entry_lines::Entity::find()
            .filter(journal_entry_lines::Column::JournalEntryId.eq(entry.id))
            .order_by_asc(journal_entry_lines::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(JournalEntryWithLines { entry, lines })
    }

    /// Lists journal entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_entries(
        &self,
        filter: JournalEntryFilter,
        page: PageRequest,
    ) -> Result<PageResponse<journal_entries::Model>, LedgerError> {
        let mut query = journal_entries::Entity::find();

        if let Some(entry_type) = filter.entry_type {
            query = query.filter(
                journal_entries::Column::EntryType
                    .eq(sea_orm_active_enums::JournalType::from(entry_type)),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(journal_entries::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(journal_entries::Column::Date.lte(to));
        }

        let query = query.order_by_desc(journal_entries::Column::Date);
        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        let paginator = query.paginate(&self.db, page.limit());
        let data = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await
            .map_err(db_err)?;

        Ok(PageResponse::new(data, page.page, page.per_page, total))
    }
}

/// Posts a journal entry inside an existing transaction.
///
/// Used directly by `post_entry` and by the order coordinators, which post
/// the derived sale/purchase entries inside the order transaction.
pub(crate) async fn post_entry_in_txn(
    txn: &DatabaseTransaction,
    input: &PostJournalEntryInput,
) -> Result<JournalEntryWithLines, LedgerError> {
    // Validate line shape and balance before any account is touched.
    stockbook_core::ledger::validate_lines(&input.lines)?;

    let accounts = fetch_line_accounts(txn, input).await?;
    let lookup = |id: AccountId| -> Result<AccountInfo, LedgerError> {
        accounts
            .get(&id.into_inner())
            .cloned()
            .ok_or(LedgerError::AccountNotFound(id.into_inner()))
    };
    let (resolved, _totals) = LedgerService::validate_and_resolve(input, lookup)?;

    let entry_number = sequence::next_document_number(txn, DocumentKind::JournalEntry)
        .await
        .map_err(db_err)?;

    let now = Utc::now().into();
    let entry = journal_entries::ActiveModel {
        id: Set(JournalEntryId::new().into_inner()),
        entry_number: Set(entry_number.into()),
        date: Set(input.date),
        description: Set(input.description.clone()),
        entry_type: Set(sea_orm_active_enums::JournalType::from(input.entry_type)),
        reference_id: Set(input.reference_id),
        user_id: Set(input.created_by.into_inner()),
        created_at: Set(now),
    };
    let entry = entry.insert(txn).await.map_err(db_err)?;

    let mut lines = Vec::with_capacity(resolved.len());
    for line in &resolved {
        let model = journal_entry_lines::ActiveModel {
            id: Set(JournalLineId::new().into_inner()),
            journal_entry_id: Set(entry.id),
            account_id: Set(line.account_id.into_inner()),
            debit: Set(line.debit),
            credit: Set(line.credit),
            description: Set(line.description.clone()),
            created_at: Set(now),
        };
        lines.push(model.insert(txn).await.map_err(db_err)?);
    }

    apply_balance_changes(txn, &resolved).await?;

    Ok(JournalEntryWithLines { entry, lines })
}

/// Fetches every account referenced by the entry's lines.
///
/// A missing account rejects the whole entry; skipping the line would break
/// the debit=credit invariant.
async fn fetch_line_accounts(
    txn: &DatabaseTransaction,
    input: &PostJournalEntryInput,
) -> Result<HashMap<Uuid, AccountInfo>, LedgerError> {
    let mut accounts = HashMap::new();
    for line in &input.lines {
        let id = line.account_id.into_inner();
        if accounts.contains_key(&id) {
            continue;
        }
        let account = crate::entities::accounts::Entity::find_by_id(id)
            .one(txn)
            .await
            .map_err(db_err)?
            .ok_or(LedgerError::AccountNotFound(id))?;
        accounts.insert(
            id,
            AccountInfo {
                id: line.account_id,
                account_type: account.account_type.into(),
                is_active: account.active,
            },
        );
    }
    Ok(accounts)
}

/// Applies the resolved balance changes with one atomic increment per
/// account. Deltas for multiple lines against the same account collapse
/// into a single update.
async fn apply_balance_changes(
    txn: &DatabaseTransaction,
    resolved: &[ResolvedLine],
) -> Result<(), LedgerError> {
    let mut deltas: HashMap<Uuid, Decimal> = HashMap::new();
    for line in resolved {
        *deltas
            .entry(line.account_id.into_inner())
            .or_insert(Decimal::ZERO) += line.balance_change;
    }

    for (account_id, delta) in deltas {
        let result = txn
            .execute(Statement::from_sql_and_values(
                sea_orm::DatabaseBackend::Postgres,
                "UPDATE accounts
                 SET balance = balance + $1, updated_at = NOW()
                 WHERE id = $2",
                [delta.into(), account_id.into()],
            ))
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::AccountNotFound(account_id));
        }
    }
    Ok(())
}

pub(crate) fn db_err(e: DbErr) -> LedgerError {
    LedgerError::Database(e.to_string())
}
