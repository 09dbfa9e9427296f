//! Atomic document number allocation.
//!
//! Document numbers are derived from a per-kind counter row updated with a
//! single `UPDATE ... RETURNING` statement. Running inside the caller's
//! transaction, the row lock serializes concurrent allocations, so numbers
//! are unique and monotonic without a count-and-add race.

use sea_orm::{ConnectionTrait, DatabaseTransaction, DbErr, Statement};
use stockbook_shared::types::{DocumentKind, DocumentNumber};

/// Allocates the next document number of the given kind.
///
/// Must be called inside the transaction that persists the document, so a
/// rollback releases the counter row lock. Rolled-back allocations leave
/// gaps; numbers are unique and monotonic, not gapless.
///
/// # Errors
///
/// Returns an error if the counter row is missing (schema not migrated) or
/// the update fails.
pub async fn next_document_number(
    txn: &DatabaseTransaction,
    kind: DocumentKind,
) -> Result<DocumentNumber, DbErr> {
    let row = txn
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Postgres,
            "UPDATE document_sequences
             SET next_value = next_value + 1, updated_at = NOW()
             WHERE kind = $1
             RETURNING next_value",
            [kind.sequence_key().into()],
        ))
        .await?
        .ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "document sequence '{}' is not seeded",
                kind.sequence_key()
            ))
        })?;

    let value: i64 = row.try_get("", "next_value")?;
    Ok(DocumentNumber::format(kind, value))
}
