use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    acts::{create_act, delete_act, get_act, get_act_report, get_acts, update_act},
    dashboard::get_dashboard,
    health::health_check,
    stores::{
        create_store, delete_store, get_store, get_store_ledger, get_stores, update_store,
    },
    summaries::{
        create_summary, delete_summary, get_summaries, get_summary, get_summary_report,
        update_summary,
    },
    supplies::{create_supply, delete_supply, get_supplies, get_supply, update_supply},
    transactions::{
        create_transaction, delete_transaction, get_transaction, get_transactions,
        update_transaction,
    },
};
use crate::schemas::{ApiDoc, AppState};

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Fleet debt overview (the landing page)
        .route("/api/v1/dashboard", get(get_dashboard))
        // Store CRUD routes
        .route("/api/v1/stores", post(create_store))
        .route("/api/v1/stores", get(get_stores))
        .route("/api/v1/stores/:store_id", get(get_store))
        .route("/api/v1/stores/:store_id", put(update_store))
        .route("/api/v1/stores/:store_id", delete(delete_store))
        .route("/api/v1/stores/:store_id/ledger", get(get_store_ledger))
        // Supply CRUD routes
        .route("/api/v1/supplies", post(create_supply))
        .route("/api/v1/supplies", get(get_supplies))
        .route("/api/v1/supplies/:supply_id", get(get_supply))
        .route("/api/v1/supplies/:supply_id", put(update_supply))
        .route("/api/v1/supplies/:supply_id", delete(delete_supply))
        // Payment CRUD routes
        .route("/api/v1/transactions", post(create_transaction))
        .route("/api/v1/transactions", get(get_transactions))
        .route("/api/v1/transactions/:transaction_id", get(get_transaction))
        .route("/api/v1/transactions/:transaction_id", put(update_transaction))
        .route("/api/v1/transactions/:transaction_id", delete(delete_transaction))
        // Reconciliation act routes
        .route("/api/v1/acts", post(create_act))
        .route("/api/v1/acts", get(get_acts))
        .route("/api/v1/acts/:act_id", get(get_act))
        .route("/api/v1/acts/:act_id", put(update_act))
        .route("/api/v1/acts/:act_id", delete(delete_act))
        .route("/api/v1/acts/:act_id/report", get(get_act_report))
        // Summary routes
        .route("/api/v1/summaries", post(create_summary))
        .route("/api/v1/summaries", get(get_summaries))
        .route("/api/v1/summaries/:summary_id", get(get_summary))
        .route("/api/v1/summaries/:summary_id", put(update_summary))
        .route("/api/v1/summaries/:summary_id", delete(delete_summary))
        .route("/api/v1/summaries/:summary_id/report", get(get_summary_report))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
