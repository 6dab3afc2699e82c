use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

use super::store;

/// A delivery of goods to a store. Increases the store's obligation.
///
/// The id is the business document number assigned by the caller, not an
/// auto-generated key. It is unique system-wide.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "supplies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    /// Delivery date, day granularity.
    pub date: NaiveDate,
    /// The store receiving the supply.
    pub store_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "store::Entity",
        from = "Column::StoreId",
        to = "store::Column::Id",
        on_delete = "Cascade"
    )]
    Store,
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
