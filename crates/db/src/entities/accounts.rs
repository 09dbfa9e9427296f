//! `SeaORM` Entity for the chart of accounts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AccountType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: Decimal,
    pub active: bool,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
    #[sea_orm(has_many = "super::journal_entry_lines::Entity")]
    JournalEntryLines,
}

impl Related<super::journal_entry_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalEntryLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
