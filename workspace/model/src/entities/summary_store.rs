use sea_orm::entity::prelude::*;

use super::{store, summary};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "summaries_stores")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub summary_id: i32,
    #[sea_orm(primary_key)]
    pub store_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "summary::Entity",
        from = "Column::SummaryId",
        to = "summary::Column::Id"
    )]
    Summary,
    #[sea_orm(
        belongs_to = "store::Entity",
        from = "Column::StoreId",
        to = "store::Column::Id"
    )]
    Store,
}

impl Related<summary::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Summary.def()
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Store.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
