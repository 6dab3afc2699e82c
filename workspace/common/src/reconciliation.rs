use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What kind of record a ledger row came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEventKind {
    /// Goods delivered to the store; increases the balance.
    Supply,
    /// Payment received from the store; decreases the balance.
    Transaction,
}

/// One row of the merged in-period ledger.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LedgerEvent {
    pub kind: LedgerEventKind,
    pub date: NaiveDate,
    pub amount: Decimal,
    /// Running balance after applying this event. Starts from zero at the
    /// period opening, i.e. it is relative to the period and does not include
    /// `balance_before`.
    pub balance: Decimal,
    /// Document id of the originating supply, for supply rows.
    pub supply_id: Option<String>,
    /// Id of the originating payment, for transaction rows.
    pub transaction_id: Option<i32>,
}

/// A reconciliation act rendered over one store and one closed date interval.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReconciliationReport {
    pub store_id: i32,
    pub store_name: String,
    pub period_start: NaiveDate,
    /// Inclusive.
    pub period_end: NaiveDate,
    /// Net position (supplies minus payments) accumulated strictly before
    /// `period_start`.
    pub balance_before: Decimal,
    pub total_supply: Decimal,
    pub total_transaction: Decimal,
    /// `balance_before + total_supply - total_transaction`.
    pub balance_after: Decimal,
    /// `max(balance_after, 0)`.
    pub debt: Decimal,
    /// `max(-balance_after, 0)`. At most one of `debt`/`overpayment` is
    /// nonzero.
    pub overpayment: Decimal,
    /// Date-ordered merge of in-period supplies and payments.
    pub events: Vec<LedgerEvent>,
}
