use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use model::entities::{store, supply};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for registering a new supply
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateSupplyRequest {
    /// Business document number; unique system-wide
    pub id: String,
    /// Supply amount
    pub amount: Decimal,
    /// Delivery date
    pub date: NaiveDate,
    /// Receiving store ID
    pub store_id: i32,
}

/// Request body for updating a supply
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateSupplyRequest {
    /// Supply amount
    pub amount: Option<Decimal>,
    /// Delivery date
    pub date: Option<NaiveDate>,
    /// Receiving store ID
    pub store_id: Option<i32>,
}

/// Supply response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SupplyResponse {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub store_id: i32,
}

impl From<supply::Model> for SupplyResponse {
    fn from(model: supply::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            date: model.date,
            store_id: model.store_id,
        }
    }
}

/// Query parameters for listing supplies
#[derive(Debug, Deserialize, IntoParams)]
pub struct SupplyListQuery {
    /// Restrict to one store
    pub store_id: Option<i32>,
}

/// Register a new supply
#[utoipa::path(
    post,
    path = "/api/v1/supplies",
    tag = "supplies",
    request_body = CreateSupplyRequest,
    responses(
        (status = 201, description = "Supply created successfully", body = ApiResponse<SupplyResponse>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 409, description = "Supply ID already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_supply(
    State(state): State<AppState>,
    Json(request): Json<CreateSupplyRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SupplyResponse>>), StatusCode> {
    trace!("Entering create_supply function");
    debug!(
        "Creating supply id: {}, amount: {}, store_id: {}",
        request.id, request.amount, request.store_id
    );

    // The id is the caller's document number; refuse to overwrite.
    match supply::Entity::find_by_id(request.id.clone()).one(&state.db).await {
        Ok(Some(_)) => {
            warn!("Supply with ID {} already exists", request.id);
            return Err(StatusCode::CONFLICT);
        }
        Ok(None) => {}
        Err(db_error) => {
            error!("Failed to check supply ID {}: {}", request.id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    match store::Entity::find_by_id(request.store_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Store with ID {} not found for supply", request.store_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup store {}: {}", request.store_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    let new_supply = supply::ActiveModel {
        id: Set(request.id.clone()),
        amount: Set(request.amount),
        date: Set(request.date),
        store_id: Set(request.store_id),
    };

    match new_supply.insert(&state.db).await {
        Ok(supply_model) => {
            info!(
                "Supply created successfully with ID: {}, store: {}",
                supply_model.id, supply_model.store_id
            );
            let response = ApiResponse {
                data: SupplyResponse::from(supply_model),
                message: "Supply created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create supply '{}': {}", request.id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all supplies, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/supplies",
    tag = "supplies",
    params(SupplyListQuery),
    responses(
        (status = 200, description = "Supplies retrieved successfully", body = ApiResponse<Vec<SupplyResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_supplies(
    Query(query): Query<SupplyListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SupplyResponse>>>, StatusCode> {
    trace!("Entering get_supplies function");

    let mut find = supply::Entity::find().order_by_asc(supply::Column::Date);
    if let Some(store_id) = query.store_id {
        find = find.filter(supply::Column::StoreId.eq(store_id));
    }

    match find.all(&state.db).await {
        Ok(supplies) => {
            debug!("Retrieved {} supplies from database", supplies.len());
            let supply_responses: Vec<SupplyResponse> =
                supplies.into_iter().map(SupplyResponse::from).collect();

            let response = ApiResponse {
                data: supply_responses,
                message: "Supplies retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve supplies from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific supply by its document number
#[utoipa::path(
    get,
    path = "/api/v1/supplies/{supply_id}",
    tag = "supplies",
    params(
        ("supply_id" = String, Path, description = "Supply document number"),
    ),
    responses(
        (status = 200, description = "Supply retrieved successfully", body = ApiResponse<SupplyResponse>),
        (status = 404, description = "Supply not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_supply(
    Path(supply_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SupplyResponse>>, StatusCode> {
    trace!("Entering get_supply function for supply_id: {}", supply_id);

    match supply::Entity::find_by_id(supply_id.clone()).one(&state.db).await {
        Ok(Some(supply_model)) => {
            let response = ApiResponse {
                data: SupplyResponse::from(supply_model),
                message: "Supply retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Supply with ID {} not found", supply_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve supply with ID {}: {}",
                supply_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a supply
#[utoipa::path(
    put,
    path = "/api/v1/supplies/{supply_id}",
    tag = "supplies",
    params(
        ("supply_id" = String, Path, description = "Supply document number"),
    ),
    request_body = UpdateSupplyRequest,
    responses(
        (status = 200, description = "Supply updated successfully", body = ApiResponse<SupplyResponse>),
        (status = 404, description = "Supply not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_supply(
    Path(supply_id): Path<String>,
    State(state): State<AppState>,
    Json(request): Json<UpdateSupplyRequest>,
) -> Result<Json<ApiResponse<SupplyResponse>>, StatusCode> {
    trace!("Entering update_supply function for supply_id: {}", supply_id);

    let existing_supply = match supply::Entity::find_by_id(supply_id.clone())
        .one(&state.db)
        .await
    {
        Ok(Some(supply)) => supply,
        Ok(None) => {
            warn!("Supply with ID {} not found for update", supply_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup supply with ID {} for update: {}",
                supply_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut supply_active: supply::ActiveModel = existing_supply.into();
    if let Some(amount) = request.amount {
        supply_active.amount = Set(amount);
    }
    if let Some(date) = request.date {
        supply_active.date = Set(date);
    }
    if let Some(store_id) = request.store_id {
        match store::Entity::find_by_id(store_id).one(&state.db).await {
            Ok(Some(_)) => supply_active.store_id = Set(store_id),
            Ok(None) => {
                warn!("Store with ID {} not found for supply update", store_id);
                return Err(StatusCode::NOT_FOUND);
            }
            Err(db_error) => {
                error!("Failed to lookup store {}: {}", store_id, db_error);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    match supply_active.update(&state.db).await {
        Ok(updated_supply) => {
            info!("Supply with ID {} updated successfully", supply_id);
            let response = ApiResponse {
                data: SupplyResponse::from(updated_supply),
                message: "Supply updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update supply with ID {}: {}",
                supply_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a supply
#[utoipa::path(
    delete,
    path = "/api/v1/supplies/{supply_id}",
    tag = "supplies",
    params(
        ("supply_id" = String, Path, description = "Supply document number"),
    ),
    responses(
        (status = 200, description = "Supply deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Supply not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_supply(
    Path(supply_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_supply function for supply_id: {}", supply_id);

    match supply::Entity::delete_by_id(supply_id.clone())
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Supply with ID {} deleted successfully", supply_id);
                let response = ApiResponse {
                    data: format!("Supply {} deleted", supply_id),
                    message: "Supply deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Supply with ID {} not found for deletion", supply_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete supply with ID {}: {}",
                supply_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
