//! Common transport-layer types shared between the computation core and the
//! HTTP layer. These structs are what the report endpoints serialize, so the
//! compute crate produces them directly instead of inventing its own shapes.

mod ledger;
mod reconciliation;

pub use ledger::{FleetDebt, StoreLedger};
pub use reconciliation::{LedgerEvent, LedgerEventKind, ReconciliationReport};
