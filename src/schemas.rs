use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use common::{FleetDebt, LedgerEvent, LedgerEventKind, ReconciliationReport, StoreLedger};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::dashboard::get_dashboard,
        crate::handlers::stores::create_store,
        crate::handlers::stores::get_stores,
        crate::handlers::stores::get_store,
        crate::handlers::stores::update_store,
        crate::handlers::stores::delete_store,
        crate::handlers::stores::get_store_ledger,
        crate::handlers::supplies::create_supply,
        crate::handlers::supplies::get_supplies,
        crate::handlers::supplies::get_supply,
        crate::handlers::supplies::update_supply,
        crate::handlers::supplies::delete_supply,
        crate::handlers::transactions::create_transaction,
        crate::handlers::transactions::get_transactions,
        crate::handlers::transactions::get_transaction,
        crate::handlers::transactions::update_transaction,
        crate::handlers::transactions::delete_transaction,
        crate::handlers::acts::create_act,
        crate::handlers::acts::get_acts,
        crate::handlers::acts::get_act,
        crate::handlers::acts::update_act,
        crate::handlers::acts::delete_act,
        crate::handlers::acts::get_act_report,
        crate::handlers::summaries::create_summary,
        crate::handlers::summaries::get_summaries,
        crate::handlers::summaries::get_summary,
        crate::handlers::summaries::update_summary,
        crate::handlers::summaries::delete_summary,
        crate::handlers::summaries::get_summary_report,
    ),
    components(
        schemas(
            ApiResponse<StoreLedger>,
            ApiResponse<FleetDebt>,
            ApiResponse<ReconciliationReport>,
            ErrorResponse,
            HealthResponse,
            StoreLedger,
            FleetDebt,
            LedgerEvent,
            LedgerEventKind,
            ReconciliationReport,
            crate::handlers::stores::CreateStoreRequest,
            crate::handlers::stores::UpdateStoreRequest,
            crate::handlers::stores::StoreResponse,
            crate::handlers::supplies::CreateSupplyRequest,
            crate::handlers::supplies::UpdateSupplyRequest,
            crate::handlers::supplies::SupplyResponse,
            crate::handlers::transactions::CreateTransactionRequest,
            crate::handlers::transactions::UpdateTransactionRequest,
            crate::handlers::transactions::TransactionResponse,
            crate::handlers::acts::CreateActRequest,
            crate::handlers::acts::UpdateActRequest,
            crate::handlers::acts::ActResponse,
            crate::handlers::summaries::CreateSummaryRequest,
            crate::handlers::summaries::UpdateSummaryRequest,
            crate::handlers::summaries::SummaryResponse,
            crate::handlers::summaries::SummaryReportResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "dashboard", description = "Fleet debt overview"),
        (name = "stores", description = "Store CRUD and ledger endpoints"),
        (name = "supplies", description = "Supply CRUD endpoints"),
        (name = "transactions", description = "Payment CRUD endpoints"),
        (name = "acts", description = "Reconciliation act CRUD and report endpoints"),
        (name = "summaries", description = "Summary CRUD and report endpoints"),
    ),
    info(
        title = "ReconRust API",
        description = "Store reconciliation tracker - supplies, payments and period reconciliation reports",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
