use async_trait::async_trait;
use chrono::NaiveDate;
use model::entities::{store, supply, transaction};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{debug, instrument, trace};

use crate::error::Result;

/// Optional date bounds for listing a store's records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateBounds {
    /// Strictly before this date.
    pub before: Option<NaiveDate>,
    /// On or after this date.
    pub from: Option<NaiveDate>,
    /// On or before this date.
    pub until: Option<NaiveDate>,
}

impl DateBounds {
    /// Everything dated strictly before `date` (opening-balance queries).
    pub fn strictly_before(date: NaiveDate) -> Self {
        Self {
            before: Some(date),
            ..Self::default()
        }
    }

    /// The closed interval `[from, until]`.
    pub fn inclusive(from: NaiveDate, until: NaiveDate) -> Self {
        Self {
            from: Some(from),
            until: Some(until),
            ..Self::default()
        }
    }
}

/// The record-store collaborator the computations read through.
///
/// Implemented for the live [`DatabaseConnection`]; the computations only see
/// this trait, so they can be exercised against any backing store.
#[async_trait]
pub trait LedgerRepository: Sync {
    async fn store_by_id(&self, store_id: i32) -> Result<Option<store::Model>>;

    /// All stores, ordered by id.
    async fn all_stores(&self) -> Result<Vec<store::Model>>;

    /// Supplies for one store within the bounds, ordered ascending by date.
    async fn supplies_for_store(
        &self,
        store_id: i32,
        bounds: DateBounds,
    ) -> Result<Vec<supply::Model>>;

    /// Payments for one store within the bounds, ordered ascending by date.
    async fn transactions_for_store(
        &self,
        store_id: i32,
        bounds: DateBounds,
    ) -> Result<Vec<transaction::Model>>;
}

fn date_condition<C: ColumnTrait>(column: C, bounds: DateBounds) -> Condition {
    let mut condition = Condition::all();
    if let Some(before) = bounds.before {
        condition = condition.add(column.lt(before));
    }
    if let Some(from) = bounds.from {
        condition = condition.add(column.gte(from));
    }
    if let Some(until) = bounds.until {
        condition = condition.add(column.lte(until));
    }
    condition
}

#[async_trait]
impl LedgerRepository for DatabaseConnection {
    #[instrument(skip(self))]
    async fn store_by_id(&self, store_id: i32) -> Result<Option<store::Model>> {
        trace!("Looking up store id={}", store_id);
        Ok(store::Entity::find_by_id(store_id).one(self).await?)
    }

    #[instrument(skip(self))]
    async fn all_stores(&self) -> Result<Vec<store::Model>> {
        let stores = store::Entity::find()
            .order_by_asc(store::Column::Id)
            .all(self)
            .await?;
        debug!("Found {} stores", stores.len());
        Ok(stores)
    }

    #[instrument(skip(self), fields(store_id = store_id, bounds = ?bounds))]
    async fn supplies_for_store(
        &self,
        store_id: i32,
        bounds: DateBounds,
    ) -> Result<Vec<supply::Model>> {
        let supplies = supply::Entity::find()
            .filter(supply::Column::StoreId.eq(store_id))
            .filter(date_condition(supply::Column::Date, bounds))
            .order_by_asc(supply::Column::Date)
            .all(self)
            .await?;

        debug!(
            "Found {} supplies for store_id={} within {:?}",
            supplies.len(),
            store_id,
            bounds
        );
        Ok(supplies)
    }

    #[instrument(skip(self), fields(store_id = store_id, bounds = ?bounds))]
    async fn transactions_for_store(
        &self,
        store_id: i32,
        bounds: DateBounds,
    ) -> Result<Vec<transaction::Model>> {
        let transactions = transaction::Entity::find()
            .filter(transaction::Column::StoreId.eq(store_id))
            .filter(date_condition(transaction::Column::Date, bounds))
            .order_by_asc(transaction::Column::Date)
            .all(self)
            .await?;

        debug!(
            "Found {} payments for store_id={} within {:?}",
            transactions.len(),
            store_id,
            bounds
        );
        Ok(transactions)
    }
}
