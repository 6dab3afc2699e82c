use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use common::ReconciliationReport;
use compute::ComputeError;
use model::entities::{act, store};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for drawing up a new reconciliation act
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateActRequest {
    /// Store the act is drawn up for
    pub store_id: i32,
    /// First day of the reconciliation period
    pub period_start: NaiveDate,
    /// Last day of the reconciliation period (inclusive)
    pub period_end: NaiveDate,
}

/// Request body for updating a reconciliation act
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateActRequest {
    /// Store the act is drawn up for
    pub store_id: Option<i32>,
    /// First day of the reconciliation period
    pub period_start: Option<NaiveDate>,
    /// Last day of the reconciliation period (inclusive)
    pub period_end: Option<NaiveDate>,
}

/// Reconciliation act response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ActResponse {
    pub id: i32,
    pub store_id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<act::Model> for ActResponse {
    fn from(model: act::Model) -> Self {
        Self {
            id: model.id,
            store_id: model.store_id,
            period_start: model.period_start,
            period_end: model.period_end,
            created_at: model.created_at,
        }
    }
}

/// Draw up a new reconciliation act
///
/// Only the parameters are stored; the report is recomputed on every read.
#[utoipa::path(
    post,
    path = "/api/v1/acts",
    tag = "acts",
    request_body = CreateActRequest,
    responses(
        (status = 201, description = "Act created successfully", body = ApiResponse<ActResponse>),
        (status = 400, description = "Period end precedes period start", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_act(
    State(state): State<AppState>,
    Json(request): Json<CreateActRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ActResponse>>), StatusCode> {
    trace!("Entering create_act function");
    debug!(
        "Creating act for store_id: {}, period: [{}, {}]",
        request.store_id, request.period_start, request.period_end
    );

    if request.period_end < request.period_start {
        warn!(
            "Rejecting act with inverted period [{}, {}]",
            request.period_start, request.period_end
        );
        return Err(StatusCode::BAD_REQUEST);
    }

    match store::Entity::find_by_id(request.store_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Store with ID {} not found for act", request.store_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup store {}: {}", request.store_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    let new_act = act::ActiveModel {
        store_id: Set(request.store_id),
        period_start: Set(request.period_start),
        period_end: Set(request.period_end),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match new_act.insert(&state.db).await {
        Ok(act_model) => {
            info!(
                "Act created successfully with ID: {}, store: {}",
                act_model.id, act_model.store_id
            );
            let response = ApiResponse {
                data: ActResponse::from(act_model),
                message: "Act created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create act for store {}: {}",
                request.store_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all reconciliation acts
#[utoipa::path(
    get,
    path = "/api/v1/acts",
    tag = "acts",
    responses(
        (status = 200, description = "Acts retrieved successfully", body = ApiResponse<Vec<ActResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_acts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ActResponse>>>, StatusCode> {
    trace!("Entering get_acts function");

    match act::Entity::find()
        .order_by_asc(act::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(acts) => {
            debug!("Retrieved {} acts from database", acts.len());
            let act_responses: Vec<ActResponse> =
                acts.into_iter().map(ActResponse::from).collect();

            let response = ApiResponse {
                data: act_responses,
                message: "Acts retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve acts from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific act by ID
#[utoipa::path(
    get,
    path = "/api/v1/acts/{act_id}",
    tag = "acts",
    params(
        ("act_id" = i32, Path, description = "Act ID"),
    ),
    responses(
        (status = 200, description = "Act retrieved successfully", body = ApiResponse<ActResponse>),
        (status = 404, description = "Act not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_act(
    Path(act_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ActResponse>>, StatusCode> {
    trace!("Entering get_act function for act_id: {}", act_id);

    match act::Entity::find_by_id(act_id).one(&state.db).await {
        Ok(Some(act_model)) => {
            let response = ApiResponse {
                data: ActResponse::from(act_model),
                message: "Act retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Act with ID {} not found", act_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve act with ID {}: {}", act_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a reconciliation act
#[utoipa::path(
    put,
    path = "/api/v1/acts/{act_id}",
    tag = "acts",
    params(
        ("act_id" = i32, Path, description = "Act ID"),
    ),
    request_body = UpdateActRequest,
    responses(
        (status = 200, description = "Act updated successfully", body = ApiResponse<ActResponse>),
        (status = 400, description = "Period end precedes period start", body = ErrorResponse),
        (status = 404, description = "Act not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_act(
    Path(act_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateActRequest>,
) -> Result<Json<ApiResponse<ActResponse>>, StatusCode> {
    trace!("Entering update_act function for act_id: {}", act_id);

    let existing_act = match act::Entity::find_by_id(act_id).one(&state.db).await {
        Ok(Some(act)) => act,
        Ok(None) => {
            warn!("Act with ID {} not found for update", act_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup act with ID {} for update: {}",
                act_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Validate the period the act would end up with
    let period_start = request.period_start.unwrap_or(existing_act.period_start);
    let period_end = request.period_end.unwrap_or(existing_act.period_end);
    if period_end < period_start {
        warn!(
            "Rejecting act update with inverted period [{}, {}]",
            period_start, period_end
        );
        return Err(StatusCode::BAD_REQUEST);
    }

    let mut act_active: act::ActiveModel = existing_act.into();
    act_active.period_start = Set(period_start);
    act_active.period_end = Set(period_end);
    if let Some(store_id) = request.store_id {
        match store::Entity::find_by_id(store_id).one(&state.db).await {
            Ok(Some(_)) => act_active.store_id = Set(store_id),
            Ok(None) => {
                warn!("Store with ID {} not found for act update", store_id);
                return Err(StatusCode::NOT_FOUND);
            }
            Err(db_error) => {
                error!("Failed to lookup store {}: {}", store_id, db_error);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    match act_active.update(&state.db).await {
        Ok(updated_act) => {
            info!("Act with ID {} updated successfully", act_id);
            let response = ApiResponse {
                data: ActResponse::from(updated_act),
                message: "Act updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update act with ID {}: {}", act_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a reconciliation act
#[utoipa::path(
    delete,
    path = "/api/v1/acts/{act_id}",
    tag = "acts",
    params(
        ("act_id" = i32, Path, description = "Act ID"),
    ),
    responses(
        (status = 200, description = "Act deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Act not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_act(
    Path(act_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_act function for act_id: {}", act_id);

    match act::Entity::delete_by_id(act_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Act with ID {} deleted successfully", act_id);
                let response = ApiResponse {
                    data: format!("Act {} deleted", act_id),
                    message: "Act deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Act with ID {} not found for deletion", act_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete act with ID {}: {}", act_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Render the reconciliation report for an act
///
/// Recomputed from current data on every call: opening balance, the merged
/// in-period ledger with running balances, totals and the debt/overpayment
/// split.
#[utoipa::path(
    get,
    path = "/api/v1/acts/{act_id}/report",
    tag = "acts",
    params(
        ("act_id" = i32, Path, description = "Act ID"),
    ),
    responses(
        (status = 200, description = "Reconciliation report computed successfully", body = ApiResponse<ReconciliationReport>),
        (status = 400, description = "Act period is invalid", body = ErrorResponse),
        (status = 404, description = "Act or store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_act_report(
    Path(act_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ReconciliationReport>>, StatusCode> {
    trace!("Entering get_act_report function for act_id: {}", act_id);

    let act_model = match act::Entity::find_by_id(act_id).one(&state.db).await {
        Ok(Some(act)) => act,
        Ok(None) => {
            warn!("Act with ID {} not found for report", act_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup act with ID {} for report: {}",
                act_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match compute::reconcile(
        &state.db,
        act_model.store_id,
        act_model.period_start,
        act_model.period_end,
    )
    .await
    {
        Ok(report) => {
            debug!(
                "Computed report for act {}: {} events, balance_after={}",
                act_id,
                report.events.len(),
                report.balance_after
            );
            let response = ApiResponse {
                data: report,
                message: "Reconciliation report computed successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(ComputeError::StoreNotFound(store_id)) => {
            warn!("Store {} behind act {} no longer exists", store_id, act_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(ComputeError::InvalidPeriod { start, end }) => {
            warn!("Act {} has invalid period [{}, {}]", act_id, start, end);
            Err(StatusCode::BAD_REQUEST)
        }
        Err(e) => {
            error!("Failed to compute report for act {}: {}", act_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
