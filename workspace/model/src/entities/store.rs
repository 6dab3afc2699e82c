use sea_orm::entity::prelude::*;

use super::{summary, summary_store};

/// A retail partner: goods are supplied to it, payments come back from it.
/// The running difference between the two is the store's debt.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::supply::Entity")]
    Supply,
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
    #[sea_orm(has_many = "super::act::Entity")]
    Act,
    /// Relation for the many-to-many relationship with Summaries.
    #[sea_orm(has_many = "super::summary_store::Entity")]
    SummaryStore,
}

impl Related<super::supply::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supply.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl Related<super::act::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Act.def()
    }
}

impl Related<summary::Entity> for Entity {
    fn to() -> RelationDef {
        summary_store::Relation::Summary.def()
    }
    fn via() -> Option<RelationDef> {
        Some(summary_store::Relation::Store.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
