//! Best-effort activity logging.
//!
//! Activity records are written after a core operation commits. A failed
//! write is logged and swallowed: the audit side channel must never roll
//! back or fail the business operation it describes.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::warn;
use uuid::Uuid;

use crate::entities::activity_logs;
use stockbook_shared::types::UserId;

/// Activity log repository.
#[derive(Debug, Clone)]
pub struct ActivityLogRepository {
    db: DatabaseConnection,
}

impl ActivityLogRepository {
    /// Creates a new activity log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records an activity. Failures are logged, never propagated.
    pub async fn record(
        &self,
        user_id: UserId,
        action: &str,
        entity: &str,
        entity_id: Uuid,
        details: Option<String>,
    ) {
        record(&self.db, user_id, action, entity, entity_id, details).await;
    }
}

/// Writes one activity record outside any business transaction.
///
/// Called by the coordinators after their transaction commits; a failure
/// here must not undo the committed operation, so it is only warned about.
pub(crate) async fn record(
    db: &DatabaseConnection,
    user_id: UserId,
    action: &str,
    entity: &str,
    entity_id: Uuid,
    details: Option<String>,
) {
    let log = activity_logs::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(user_id.into_inner()),
        action: Set(action.to_string()),
        entity: Set(entity.to_string()),
        entity_id: Set(entity_id),
        details: Set(details),
        created_at: Set(Utc::now().into()),
    };

    if let Err(e) = log.insert(db).await {
        warn!(entity, %entity_id, error = %e, "failed to record activity log");
    }
}
