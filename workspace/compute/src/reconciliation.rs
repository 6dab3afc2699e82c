use chrono::NaiveDate;
use common::{LedgerEvent, LedgerEventKind, ReconciliationReport};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};
use crate::repository::{DateBounds, LedgerRepository};

/// Renders a reconciliation report for one store over the closed interval
/// `[period_start, period_end]`.
///
/// The opening balance is the store's net position over everything dated
/// strictly before the period. In-period supplies and payments are merged
/// into one ledger ordered ascending by date; for records sharing a date,
/// supplies come first.
///
/// Note on the two balance columns: the per-event running balance starts at
/// zero and is relative to the period, while `balance_after` is
/// `balance_before + total_supply - total_transaction`. With a nonzero
/// opening balance the last event's running balance and `balance_after`
/// deliberately differ; acts have always been rendered this way and the
/// period column would be wrong for comparing against a delivery log
/// otherwise.
#[instrument(skip(repo))]
pub async fn reconcile(
    repo: &dyn LedgerRepository,
    store_id: i32,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Result<ReconciliationReport> {
    if period_end < period_start {
        return Err(ComputeError::InvalidPeriod {
            start: period_start,
            end: period_end,
        });
    }

    let store = repo
        .store_by_id(store_id)
        .await?
        .ok_or(ComputeError::StoreNotFound(store_id))?;

    // Net position accumulated strictly before the period.
    let supply_before: Decimal = repo
        .supplies_for_store(store_id, DateBounds::strictly_before(period_start))
        .await?
        .iter()
        .map(|s| s.amount)
        .sum();
    let transaction_before: Decimal = repo
        .transactions_for_store(store_id, DateBounds::strictly_before(period_start))
        .await?
        .iter()
        .map(|t| t.amount)
        .sum();
    let balance_before = supply_before - transaction_before;

    let supplies = repo
        .supplies_for_store(store_id, DateBounds::inclusive(period_start, period_end))
        .await?;
    let transactions = repo
        .transactions_for_store(store_id, DateBounds::inclusive(period_start, period_end))
        .await?;

    let total_supply: Decimal = supplies.iter().map(|s| s.amount).sum();
    let total_transaction: Decimal = transactions.iter().map(|t| t.amount).sum();

    // Merge into one chronological ledger. Supplies are pushed first and the
    // sort is stable, so a supply precedes a payment on the same day.
    let mut events: Vec<LedgerEvent> = Vec::with_capacity(supplies.len() + transactions.len());
    for supply in supplies {
        events.push(LedgerEvent {
            kind: LedgerEventKind::Supply,
            date: supply.date,
            amount: supply.amount,
            balance: Decimal::ZERO,
            supply_id: Some(supply.id),
            transaction_id: None,
        });
    }
    for transaction in transactions {
        events.push(LedgerEvent {
            kind: LedgerEventKind::Transaction,
            date: transaction.date,
            amount: transaction.amount,
            balance: Decimal::ZERO,
            supply_id: None,
            transaction_id: Some(transaction.id),
        });
    }
    events.sort_by_key(|event| event.date);

    // Period-relative running balance; see the note above.
    let mut running = Decimal::ZERO;
    for event in &mut events {
        match event.kind {
            LedgerEventKind::Supply => running += event.amount,
            LedgerEventKind::Transaction => running -= event.amount,
        }
        event.balance = running;
    }

    let balance_after = balance_before + total_supply - total_transaction;

    debug!(
        "Reconciled store_id={} over [{}, {}]: {} events, balance_before={}, balance_after={}",
        store_id,
        period_start,
        period_end,
        events.len(),
        balance_before,
        balance_after
    );

    Ok(ReconciliationReport {
        store_id,
        store_name: store.name,
        period_start,
        period_end,
        balance_before,
        total_supply,
        total_transaction,
        balance_after,
        debt: balance_after.max(Decimal::ZERO),
        overpayment: (-balance_after).max(Decimal::ZERO),
        events,
    })
}
