use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use super::store;

/// A reconciliation act: a per-store report over a closed date interval.
///
/// Only the parameters are stored. The ledger, totals and debt/overpayment
/// split are recomputed from current data on every read, so editing or
/// deleting supplies and payments never leaves a stale act behind.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "acts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub period_start: NaiveDate,
    /// Inclusive. Must not precede `period_start`.
    pub period_end: NaiveDate,
    pub store_id: i32,
    pub created_at: DateTimeUtc,
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
