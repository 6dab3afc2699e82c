use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate financial position of a single store over its whole history.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StoreLedger {
    pub store_id: i32,
    pub store_name: String,
    /// Sum of all supply amounts for the store, zero when there are none.
    pub supply_total: Decimal,
    /// Sum of all payment amounts for the store, zero when there are none.
    pub transaction_total: Decimal,
    /// Signed balance: `supply_total - transaction_total`. Negative means the
    /// store has paid more than it was supplied.
    pub net_position: Decimal,
    /// Non-negative amount still owed: `net_position` floored at zero.
    pub debt: Decimal,
}

/// Debt overview across the whole fleet of stores.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct FleetDebt {
    pub store_count: u64,
    /// Per-store ledgers, sorted descending by debt (presentation order).
    pub stores: Vec<StoreLedger>,
    pub total_supply: Decimal,
    pub total_transaction: Decimal,
    /// Sum of the clamped per-store debts. An overpaying store contributes
    /// zero here, never a negative amount.
    pub total_debt: Decimal,
}
