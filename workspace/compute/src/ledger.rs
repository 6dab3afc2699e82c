use common::{FleetDebt, StoreLedger};
use model::entities::store;
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::repository::{DateBounds, LedgerRepository};

/// Totals for one store over its entire history: supplied, paid, and the
/// signed/clamped balance between the two.
#[instrument(skip(repo))]
pub async fn store_ledger(repo: &dyn LedgerRepository, store_id: i32) -> Result<StoreLedger> {
    let store = repo
        .store_by_id(store_id)
        .await?
        .ok_or(ComputeError::StoreNotFound(store_id))?;

    ledger_for(repo, &store).await
}

/// Shared by the single-store and fleet paths; the store is already resolved.
async fn ledger_for(repo: &dyn LedgerRepository, store: &store::Model) -> Result<StoreLedger> {
    let supplies = repo
        .supplies_for_store(store.id, DateBounds::default())
        .await?;
    let transactions = repo
        .transactions_for_store(store.id, DateBounds::default())
        .await?;

    let supply_total: Decimal = supplies.iter().map(|s| s.amount).sum();
    let transaction_total: Decimal = transactions.iter().map(|t| t.amount).sum();
    let net_position = supply_total - transaction_total;

    Ok(StoreLedger {
        store_id: store.id,
        store_name: store.name.clone(),
        supply_total,
        transaction_total,
        net_position,
        debt: net_position.max(Decimal::ZERO),
    })
}

/// Per-store ledgers for every store plus fleet totals.
///
/// Only the clamped per-store `debt` feeds `total_debt`: a store that has
/// overpaid contributes zero, it does not pull the fleet total down.
#[instrument(skip(repo))]
pub async fn fleet_debt(repo: &dyn LedgerRepository) -> Result<FleetDebt> {
    let mut stores = Vec::new();
    for store in repo.all_stores().await? {
        stores.push(ledger_for(repo, &store).await?);
    }

    let total_supply: Decimal = stores.iter().map(|l| l.supply_total).sum();
    let total_transaction: Decimal = stores.iter().map(|l| l.transaction_total).sum();
    let total_debt: Decimal = stores.iter().map(|l| l.debt).sum();

    // Presentation order: biggest debtor first. The sort is stable, so equal
    // debts keep their store-id order.
    stores.sort_by(|a, b| b.debt.cmp(&a.debt));

    debug!(
        "Fleet debt over {} stores: total_debt={}",
        stores.len(),
        total_debt
    );

    Ok(FleetDebt {
        store_count: stores.len() as u64,
        stores,
        total_supply,
        total_transaction,
        total_debt,
    })
}
