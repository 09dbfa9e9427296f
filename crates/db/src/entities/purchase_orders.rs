//! `SeaORM` Entity for purchase orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::OrderStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub supplier_id: Uuid,
    pub user_id: Uuid,
    pub order_date: DateTimeWithTimeZone,
    pub total_amount: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
    pub paid_amount: Decimal,
    pub balance: Decimal,
    pub status: OrderStatus,
    pub received_date: Option<DateTimeWithTimeZone>,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::suppliers::Entity",
        from = "Column::SupplierId",
        to = "super::suppliers::Column::Id"
    )]
    Suppliers,
    #[sea_orm(has_many = "super::purchase_order_items::Entity")]
    PurchaseOrderItems,
}

impl Related<super::suppliers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Suppliers.def()
    }
}

impl Related<super::purchase_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
