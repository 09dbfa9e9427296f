//! `SeaORM` Entity for journal entries.
//!
//! Journal entries are append-only facts: once created they are never
//! updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::JournalType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub entry_number: String,
    pub date: Date,
    pub description: String,
    pub entry_type: JournalType,
    pub reference_id: Option<Uuid>,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::journal_entry_lines::Entity")]
    JournalEntryLines,
}

impl Related<super::journal_entry_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntryLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
