//! Read-only computations over the record store: per-store ledger totals,
//! fleet-wide debt, and period reconciliation reports. Everything here is a
//! pure function of the stored data; nothing is mutated or cached.

pub mod error;
pub mod ledger;
pub mod reconciliation;
pub mod repository;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{ComputeError, Result};
pub use ledger::{fleet_debt, store_ledger};
pub use reconciliation::reconcile;
pub use repository::{DateBounds, LedgerRepository};
