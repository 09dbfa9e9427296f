//! `SeaORM` Entity for sales orders.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{OrderStatus, PaymentMethod};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub customer_id: Uuid,
    pub user_id: Uuid,
    pub order_date: DateTimeWithTimeZone,
    pub total_amount: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub grand_total: Decimal,
    pub paid_amount: Decimal,
    pub balance: Decimal,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::customers::Entity",
        from = "Column::CustomerId",
        to = "super::customers::Column::Id"
    )]
    Customers,
    #[sea_orm(has_many = "super::sales_order_items::Entity")]
    SalesOrderItems,
}

impl Related<super::customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Customers.def()
    }
}

impl Related<super::sales_order_items::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SalesOrderItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
