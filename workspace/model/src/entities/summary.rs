use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use super::{store, summary_store};

/// A fleet-wide debt snapshot over a date interval, linked to the stores it
/// was drawn up for. Like acts, the report itself is recomputed on read.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "summaries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Relation for the many-to-many relationship with Stores.
    #[sea_orm(has_many = "summary_store::Entity")]
    SummaryStore,
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef {
        summary_store::Relation::Store.def()
    }
    fn via() -> Option<RelationDef> {
        Some(summary_store::Relation::Summary.def().rev())
    }
}

impl Related<summary_store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SummaryStore.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
