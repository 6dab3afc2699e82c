use axum::{extract::State, http::StatusCode, response::Json};
use common::FleetDebt;
use tracing::{error, instrument};

use crate::schemas::{ApiResponse, AppState};

/// Fleet-wide debt overview: every store's ledger plus the summed debt,
/// biggest debtor first. This is the landing-page payload.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    responses(
        (status = 200, description = "Fleet debt overview retrieved successfully", body = ApiResponse<FleetDebt>),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument]
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<FleetDebt>>, StatusCode> {
    match compute::fleet_debt(&state.db).await {
        Ok(fleet) => {
            let response = ApiResponse {
                data: fleet,
                message: "Fleet debt overview retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!("Failed to compute fleet debt: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
