use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use common::FleetDebt;
use model::entities::{store, summary, summary_store};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for drawing up a new summary
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSummaryRequest {
    /// First day of the covered period
    pub period_start: NaiveDate,
    /// Last day of the covered period (inclusive)
    pub period_end: NaiveDate,
    /// Stores the summary is drawn up for
    pub store_ids: Vec<i32>,
}

/// Request body for updating a summary
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSummaryRequest {
    /// First day of the covered period
    pub period_start: Option<NaiveDate>,
    /// Last day of the covered period (inclusive)
    pub period_end: Option<NaiveDate>,
    /// Replaces the full store set when present
    pub store_ids: Option<Vec<i32>>,
}

/// Summary response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryResponse {
    pub id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub store_ids: Vec<i32>,
}

/// Summary report: the stored parameters plus a freshly computed fleet
/// debt overview
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryReportResponse {
    pub id: i32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub fleet: FleetDebt,
}

async fn member_store_ids(
    db: &sea_orm::DatabaseConnection,
    summary_model: &summary::Model,
) -> Result<Vec<i32>, sea_orm::DbErr> {
    Ok(summary_model
        .find_related(summary_store::Entity)
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.store_id)
        .collect())
}

async fn replace_members(
    db: &sea_orm::DatabaseConnection,
    summary_id: i32,
    store_ids: &[i32],
) -> Result<(), sea_orm::DbErr> {
    summary_store::Entity::delete_many()
        .filter(summary_store::Column::SummaryId.eq(summary_id))
        .exec(db)
        .await?;

    let mut members: Vec<i32> = store_ids.to_vec();
    members.sort_unstable();
    members.dedup();

    if !members.is_empty() {
        summary_store::Entity::insert_many(members.into_iter().map(|store_id| {
            summary_store::ActiveModel {
                summary_id: Set(summary_id),
                store_id: Set(store_id),
            }
        }))
        .exec(db)
        .await?;
    }

    Ok(())
}

/// Verify every referenced store exists before linking to it.
async fn all_stores_exist(
    db: &sea_orm::DatabaseConnection,
    store_ids: &[i32],
) -> Result<bool, sea_orm::DbErr> {
    for &store_id in store_ids {
        if store::Entity::find_by_id(store_id).one(db).await?.is_none() {
            warn!("Store with ID {} not found for summary", store_id);
            return Ok(false);
        }
    }
    Ok(true)
}

/// Draw up a new summary
#[utoipa::path(
    post,
    path = "/api/v1/summaries",
    tag = "summaries",
    request_body = CreateSummaryRequest,
    responses(
        (status = 201, description = "Summary created successfully", body = ApiResponse<SummaryResponse>),
        (status = 400, description = "Period end precedes period start", body = ErrorResponse),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_summary(
    State(state): State<AppState>,
    Json(request): Json<CreateSummaryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SummaryResponse>>), StatusCode> {
    trace!("Entering create_summary function");
    debug!(
        "Creating summary over [{}, {}] for {} stores",
        request.period_start,
        request.period_end,
        request.store_ids.len()
    );

    if request.period_end < request.period_start {
        warn!(
            "Rejecting summary with inverted period [{}, {}]",
            request.period_start, request.period_end
        );
        return Err(StatusCode::BAD_REQUEST);
    }

    match all_stores_exist(&state.db, &request.store_ids).await {
        Ok(true) => {}
        Ok(false) => return Err(StatusCode::NOT_FOUND),
        Err(db_error) => {
            error!("Failed to check summary stores: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    let new_summary = summary::ActiveModel {
        period_start: Set(request.period_start),
        period_end: Set(request.period_end),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let summary_model = match new_summary.insert(&state.db).await {
        Ok(model) => model,
        Err(db_error) => {
            error!("Failed to create summary: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Err(db_error) = replace_members(&state.db, summary_model.id, &request.store_ids).await {
        error!(
            "Failed to link stores to summary {}: {}",
            summary_model.id, db_error
        );
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let store_ids = match member_store_ids(&state.db, &summary_model).await {
        Ok(ids) => ids,
        Err(db_error) => {
            error!(
                "Failed to read back summary {} members: {}",
                summary_model.id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!("Summary created successfully with ID: {}", summary_model.id);
    let response = ApiResponse {
        data: SummaryResponse {
            id: summary_model.id,
            period_start: summary_model.period_start,
            period_end: summary_model.period_end,
            created_at: summary_model.created_at,
            store_ids,
        },
        message: "Summary created successfully".to_string(),
        success: true,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Get all summaries
#[utoipa::path(
    get,
    path = "/api/v1/summaries",
    tag = "summaries",
    responses(
        (status = 200, description = "Summaries retrieved successfully", body = ApiResponse<Vec<SummaryResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_summaries(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SummaryResponse>>>, StatusCode> {
    trace!("Entering get_summaries function");

    let summaries = match summary::Entity::find()
        .order_by_asc(summary::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(summaries) => summaries,
        Err(db_error) => {
            error!("Failed to retrieve summaries from database: {}", db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut summary_responses = Vec::with_capacity(summaries.len());
    for summary_model in summaries {
        let store_ids = match member_store_ids(&state.db, &summary_model).await {
            Ok(ids) => ids,
            Err(db_error) => {
                error!(
                    "Failed to read summary {} members: {}",
                    summary_model.id, db_error
                );
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };
        summary_responses.push(SummaryResponse {
            id: summary_model.id,
            period_start: summary_model.period_start,
            period_end: summary_model.period_end,
            created_at: summary_model.created_at,
            store_ids,
        });
    }

    debug!("Retrieved {} summaries from database", summary_responses.len());
    let response = ApiResponse {
        data: summary_responses,
        message: "Summaries retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Get a specific summary by ID
#[utoipa::path(
    get,
    path = "/api/v1/summaries/{summary_id}",
    tag = "summaries",
    params(
        ("summary_id" = i32, Path, description = "Summary ID"),
    ),
    responses(
        (status = 200, description = "Summary retrieved successfully", body = ApiResponse<SummaryResponse>),
        (status = 404, description = "Summary not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_summary(
    Path(summary_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SummaryResponse>>, StatusCode> {
    trace!("Entering get_summary function for summary_id: {}", summary_id);

    let summary_model = match summary::Entity::find_by_id(summary_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Summary with ID {} not found", summary_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve summary with ID {}: {}",
                summary_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let store_ids = match member_store_ids(&state.db, &summary_model).await {
        Ok(ids) => ids,
        Err(db_error) => {
            error!(
                "Failed to read summary {} members: {}",
                summary_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let response = ApiResponse {
        data: SummaryResponse {
            id: summary_model.id,
            period_start: summary_model.period_start,
            period_end: summary_model.period_end,
            created_at: summary_model.created_at,
            store_ids,
        },
        message: "Summary retrieved successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Update a summary
#[utoipa::path(
    put,
    path = "/api/v1/summaries/{summary_id}",
    tag = "summaries",
    params(
        ("summary_id" = i32, Path, description = "Summary ID"),
    ),
    request_body = UpdateSummaryRequest,
    responses(
        (status = 200, description = "Summary updated successfully", body = ApiResponse<SummaryResponse>),
        (status = 400, description = "Period end precedes period start", body = ErrorResponse),
        (status = 404, description = "Summary or store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_summary(
    Path(summary_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateSummaryRequest>,
) -> Result<Json<ApiResponse<SummaryResponse>>, StatusCode> {
    trace!("Entering update_summary function for summary_id: {}", summary_id);

    let existing_summary = match summary::Entity::find_by_id(summary_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Summary with ID {} not found for update", summary_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup summary with ID {} for update: {}",
                summary_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Validate the period the summary would end up with
    let period_start = request.period_start.unwrap_or(existing_summary.period_start);
    let period_end = request.period_end.unwrap_or(existing_summary.period_end);
    if period_end < period_start {
        warn!(
            "Rejecting summary update with inverted period [{}, {}]",
            period_start, period_end
        );
        return Err(StatusCode::BAD_REQUEST);
    }

    if let Some(store_ids) = &request.store_ids {
        match all_stores_exist(&state.db, store_ids).await {
            Ok(true) => {}
            Ok(false) => return Err(StatusCode::NOT_FOUND),
            Err(db_error) => {
                error!("Failed to check summary stores: {}", db_error);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    let mut summary_active: summary::ActiveModel = existing_summary.into();
    summary_active.period_start = Set(period_start);
    summary_active.period_end = Set(period_end);

    let summary_model = match summary_active.update(&state.db).await {
        Ok(model) => model,
        Err(db_error) => {
            error!(
                "Failed to update summary with ID {}: {}",
                summary_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if let Some(store_ids) = &request.store_ids {
        if let Err(db_error) = replace_members(&state.db, summary_id, store_ids).await {
            error!(
                "Failed to relink stores for summary {}: {}",
                summary_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    let store_ids = match member_store_ids(&state.db, &summary_model).await {
        Ok(ids) => ids,
        Err(db_error) => {
            error!(
                "Failed to read summary {} members: {}",
                summary_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!("Summary with ID {} updated successfully", summary_id);
    let response = ApiResponse {
        data: SummaryResponse {
            id: summary_model.id,
            period_start: summary_model.period_start,
            period_end: summary_model.period_end,
            created_at: summary_model.created_at,
            store_ids,
        },
        message: "Summary updated successfully".to_string(),
        success: true,
    };
    Ok(Json(response))
}

/// Delete a summary
#[utoipa::path(
    delete,
    path = "/api/v1/summaries/{summary_id}",
    tag = "summaries",
    params(
        ("summary_id" = i32, Path, description = "Summary ID"),
    ),
    responses(
        (status = 200, description = "Summary deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Summary not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_summary(
    Path(summary_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_summary function for summary_id: {}", summary_id);

    match summary::Entity::delete_by_id(summary_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Summary with ID {} deleted successfully", summary_id);
                let response = ApiResponse {
                    data: format!("Summary {} deleted", summary_id),
                    message: "Summary deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Summary with ID {} not found for deletion", summary_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete summary with ID {}: {}",
                summary_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Render the debt snapshot for a summary
///
/// The stored parameters plus the fleet debt overview recomputed from
/// current data. The snapshot covers every store on file, which is how the
/// summary sheet has always been printed; the linked store set records who
/// the summary was drawn up for.
#[utoipa::path(
    get,
    path = "/api/v1/summaries/{summary_id}/report",
    tag = "summaries",
    params(
        ("summary_id" = i32, Path, description = "Summary ID"),
    ),
    responses(
        (status = 200, description = "Summary report computed successfully", body = ApiResponse<SummaryReportResponse>),
        (status = 404, description = "Summary not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_summary_report(
    Path(summary_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SummaryReportResponse>>, StatusCode> {
    trace!(
        "Entering get_summary_report function for summary_id: {}",
        summary_id
    );

    let summary_model = match summary::Entity::find_by_id(summary_id).one(&state.db).await {
        Ok(Some(model)) => model,
        Ok(None) => {
            warn!("Summary with ID {} not found for report", summary_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup summary with ID {} for report: {}",
                summary_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match compute::fleet_debt(&state.db).await {
        Ok(fleet) => {
            debug!(
                "Computed summary report {}: {} stores, total_debt={}",
                summary_id, fleet.store_count, fleet.total_debt
            );
            let response = ApiResponse {
                data: SummaryReportResponse {
                    id: summary_model.id,
                    period_start: summary_model.period_start,
                    period_end: summary_model.period_end,
                    created_at: summary_model.created_at,
                    fleet,
                },
                message: "Summary report computed successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(e) => {
            error!(
                "Failed to compute summary report for {}: {}",
                summary_id, e
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
