use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::StoreLedger;
use compute::ComputeError;
use model::entities::store;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::ToSchema;

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for creating a new store
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateStoreRequest {
    /// Store name
    pub name: String,
    /// Street address
    pub address: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
}

/// Request body for updating a store
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateStoreRequest {
    /// Store name
    pub name: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
}

/// Store response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StoreResponse {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl From<store::Model> for StoreResponse {
    fn from(model: store::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            phone: model.phone,
        }
    }
}

/// Create a new store
#[utoipa::path(
    post,
    path = "/api/v1/stores",
    tag = "stores",
    request_body = CreateStoreRequest,
    responses(
        (status = 201, description = "Store created successfully", body = ApiResponse<StoreResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_store(
    State(state): State<AppState>,
    Json(request): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StoreResponse>>), StatusCode> {
    trace!("Entering create_store function");
    debug!("Creating store with name: {}", request.name);

    let new_store = store::ActiveModel {
        name: Set(request.name.clone()),
        address: Set(request.address.clone()),
        phone: Set(request.phone.clone()),
        ..Default::default()
    };

    match new_store.insert(&state.db).await {
        Ok(store_model) => {
            info!(
                "Store created successfully with ID: {}, name: {}",
                store_model.id, store_model.name
            );
            let response = ApiResponse {
                data: StoreResponse::from(store_model),
                message: "Store created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!("Failed to create store '{}': {}", request.name, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all stores
#[utoipa::path(
    get,
    path = "/api/v1/stores",
    tag = "stores",
    responses(
        (status = 200, description = "Stores retrieved successfully", body = ApiResponse<Vec<StoreResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_stores(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StoreResponse>>>, StatusCode> {
    trace!("Entering get_stores function");

    match store::Entity::find()
        .order_by_asc(store::Column::Id)
        .all(&state.db)
        .await
    {
        Ok(stores) => {
            debug!("Retrieved {} stores from database", stores.len());
            let store_responses: Vec<StoreResponse> =
                stores.into_iter().map(StoreResponse::from).collect();

            let response = ApiResponse {
                data: store_responses,
                message: "Stores retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve stores from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific store by ID
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}",
    tag = "stores",
    params(
        ("store_id" = i32, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Store retrieved successfully", body = ApiResponse<StoreResponse>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_store(
    Path(store_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StoreResponse>>, StatusCode> {
    trace!("Entering get_store function for store_id: {}", store_id);

    match store::Entity::find_by_id(store_id).one(&state.db).await {
        Ok(Some(store_model)) => {
            let response = ApiResponse {
                data: StoreResponse::from(store_model),
                message: "Store retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Store with ID {} not found", store_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!("Failed to retrieve store with ID {}: {}", store_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a store
#[utoipa::path(
    put,
    path = "/api/v1/stores/{store_id}",
    tag = "stores",
    params(
        ("store_id" = i32, Path, description = "Store ID"),
    ),
    request_body = UpdateStoreRequest,
    responses(
        (status = 200, description = "Store updated successfully", body = ApiResponse<StoreResponse>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_store(
    Path(store_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateStoreRequest>,
) -> Result<Json<ApiResponse<StoreResponse>>, StatusCode> {
    trace!("Entering update_store function for store_id: {}", store_id);

    // First, find the existing store
    let existing_store = match store::Entity::find_by_id(store_id).one(&state.db).await {
        Ok(Some(store)) => store,
        Ok(None) => {
            warn!("Store with ID {} not found for update", store_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup store with ID {} for update: {}",
                store_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    // Update only provided fields
    let mut store_active: store::ActiveModel = existing_store.into();
    if let Some(name) = request.name {
        debug!("Updating store name to: {}", name);
        store_active.name = Set(name);
    }
    if let Some(address) = request.address {
        store_active.address = Set(Some(address));
    }
    if let Some(phone) = request.phone {
        store_active.phone = Set(Some(phone));
    }

    match store_active.update(&state.db).await {
        Ok(updated_store) => {
            info!("Store with ID {} updated successfully", store_id);
            let response = ApiResponse {
                data: StoreResponse::from(updated_store),
                message: "Store updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to update store with ID {}: {}", store_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a store
///
/// Cascades to the store's supplies, payments and acts.
#[utoipa::path(
    delete,
    path = "/api/v1/stores/{store_id}",
    tag = "stores",
    params(
        ("store_id" = i32, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Store deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_store(
    Path(store_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!("Entering delete_store function for store_id: {}", store_id);

    match store::Entity::delete_by_id(store_id).exec(&state.db).await {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Store with ID {} deleted successfully", store_id);
                let response = ApiResponse {
                    data: format!("Store {} deleted", store_id),
                    message: "Store deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Store with ID {} not found for deletion", store_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!("Failed to delete store with ID {}: {}", store_id, db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get the aggregate ledger for a store
///
/// Totals over the store's whole history: supplied, paid, signed net
/// position and the non-negative debt.
#[utoipa::path(
    get,
    path = "/api/v1/stores/{store_id}/ledger",
    tag = "stores",
    params(
        ("store_id" = i32, Path, description = "Store ID"),
    ),
    responses(
        (status = 200, description = "Store ledger retrieved successfully", body = ApiResponse<StoreLedger>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_store_ledger(
    Path(store_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<StoreLedger>>, StatusCode> {
    trace!("Entering get_store_ledger function for store_id: {}", store_id);

    match compute::store_ledger(&state.db, store_id).await {
        Ok(ledger) => {
            let response = ApiResponse {
                data: ledger,
                message: "Store ledger retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(ComputeError::StoreNotFound(_)) => {
            warn!("Store with ID {} not found for ledger", store_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            error!("Failed to compute ledger for store {}: {}", store_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
