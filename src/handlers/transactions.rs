use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use model::entities::{store, transaction};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, trace, warn};
use utoipa::{IntoParams, ToSchema};

use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Request body for registering a new payment
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateTransactionRequest {
    /// Payment amount
    pub amount: Decimal,
    /// Payment date
    pub date: NaiveDate,
    /// Paying store ID
    pub store_id: i32,
}

/// Request body for updating a payment
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateTransactionRequest {
    /// Payment amount
    pub amount: Option<Decimal>,
    /// Payment date
    pub date: Option<NaiveDate>,
    /// Paying store ID
    pub store_id: Option<i32>,
}

/// Payment response model
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransactionResponse {
    pub id: i32,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub store_id: i32,
}

impl From<transaction::Model> for TransactionResponse {
    fn from(model: transaction::Model) -> Self {
        Self {
            id: model.id,
            amount: model.amount,
            date: model.date,
            store_id: model.store_id,
        }
    }
}

/// Query parameters for listing payments
#[derive(Debug, Deserialize, IntoParams)]
pub struct TransactionListQuery {
    /// Restrict to one store
    pub store_id: Option<i32>,
}

/// Register a new payment
#[utoipa::path(
    post,
    path = "/api/v1/transactions",
    tag = "transactions",
    request_body = CreateTransactionRequest,
    responses(
        (status = 201, description = "Payment created successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Store not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionResponse>>), StatusCode> {
    trace!("Entering create_transaction function");
    debug!(
        "Creating payment amount: {}, date: {}, store_id: {}",
        request.amount, request.date, request.store_id
    );

    match store::Entity::find_by_id(request.store_id).one(&state.db).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            warn!("Store with ID {} not found for payment", request.store_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!("Failed to lookup store {}: {}", request.store_id, db_error);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    let new_transaction = transaction::ActiveModel {
        amount: Set(request.amount),
        date: Set(request.date),
        store_id: Set(request.store_id),
        ..Default::default()
    };

    match new_transaction.insert(&state.db).await {
        Ok(transaction_model) => {
            info!(
                "Payment created successfully with ID: {}, store: {}",
                transaction_model.id, transaction_model.store_id
            );
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Payment created successfully".to_string(),
                success: true,
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(db_error) => {
            error!(
                "Failed to create payment for store {}: {}",
                request.store_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get all payments, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tag = "transactions",
    params(TransactionListQuery),
    responses(
        (status = 200, description = "Payments retrieved successfully", body = ApiResponse<Vec<TransactionResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_transactions(
    Query(query): Query<TransactionListQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TransactionResponse>>>, StatusCode> {
    trace!("Entering get_transactions function");

    let mut find = transaction::Entity::find().order_by_asc(transaction::Column::Date);
    if let Some(store_id) = query.store_id {
        find = find.filter(transaction::Column::StoreId.eq(store_id));
    }

    match find.all(&state.db).await {
        Ok(transactions) => {
            debug!("Retrieved {} payments from database", transactions.len());
            let transaction_responses: Vec<TransactionResponse> = transactions
                .into_iter()
                .map(TransactionResponse::from)
                .collect();

            let response = ApiResponse {
                data: transaction_responses,
                message: "Payments retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!("Failed to retrieve payments from database: {}", db_error);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Get a specific payment by ID
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Payment ID"),
    ),
    responses(
        (status = 200, description = "Payment retrieved successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<TransactionResponse>>, StatusCode> {
    trace!(
        "Entering get_transaction function for transaction_id: {}",
        transaction_id
    );

    match transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await
    {
        Ok(Some(transaction_model)) => {
            let response = ApiResponse {
                data: TransactionResponse::from(transaction_model),
                message: "Payment retrieved successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Ok(None) => {
            warn!("Payment with ID {} not found", transaction_id);
            Err(StatusCode::NOT_FOUND)
        }
        Err(db_error) => {
            error!(
                "Failed to retrieve payment with ID {}: {}",
                transaction_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Update a payment
#[utoipa::path(
    put,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Payment ID"),
    ),
    request_body = UpdateTransactionRequest,
    responses(
        (status = 200, description = "Payment updated successfully", body = ApiResponse<TransactionResponse>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
    Json(request): Json<UpdateTransactionRequest>,
) -> Result<Json<ApiResponse<TransactionResponse>>, StatusCode> {
    trace!(
        "Entering update_transaction function for transaction_id: {}",
        transaction_id
    );

    let existing_transaction = match transaction::Entity::find_by_id(transaction_id)
        .one(&state.db)
        .await
    {
        Ok(Some(transaction)) => transaction,
        Ok(None) => {
            warn!("Payment with ID {} not found for update", transaction_id);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(db_error) => {
            error!(
                "Failed to lookup payment with ID {} for update: {}",
                transaction_id, db_error
            );
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut transaction_active: transaction::ActiveModel = existing_transaction.into();
    if let Some(amount) = request.amount {
        transaction_active.amount = Set(amount);
    }
    if let Some(date) = request.date {
        transaction_active.date = Set(date);
    }
    if let Some(store_id) = request.store_id {
        match store::Entity::find_by_id(store_id).one(&state.db).await {
            Ok(Some(_)) => transaction_active.store_id = Set(store_id),
            Ok(None) => {
                warn!("Store with ID {} not found for payment update", store_id);
                return Err(StatusCode::NOT_FOUND);
            }
            Err(db_error) => {
                error!("Failed to lookup store {}: {}", store_id, db_error);
                return Err(StatusCode::INTERNAL_SERVER_ERROR);
            }
        }
    }

    match transaction_active.update(&state.db).await {
        Ok(updated_transaction) => {
            info!("Payment with ID {} updated successfully", transaction_id);
            let response = ApiResponse {
                data: TransactionResponse::from(updated_transaction),
                message: "Payment updated successfully".to_string(),
                success: true,
            };
            Ok(Json(response))
        }
        Err(db_error) => {
            error!(
                "Failed to update payment with ID {}: {}",
                transaction_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Delete a payment
#[utoipa::path(
    delete,
    path = "/api/v1/transactions/{transaction_id}",
    tag = "transactions",
    params(
        ("transaction_id" = i32, Path, description = "Payment ID"),
    ),
    responses(
        (status = 200, description = "Payment deleted successfully", body = ApiResponse<String>),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn delete_transaction(
    Path(transaction_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    trace!(
        "Entering delete_transaction function for transaction_id: {}",
        transaction_id
    );

    match transaction::Entity::delete_by_id(transaction_id)
        .exec(&state.db)
        .await
    {
        Ok(delete_result) => {
            if delete_result.rows_affected > 0 {
                info!("Payment with ID {} deleted successfully", transaction_id);
                let response = ApiResponse {
                    data: format!("Payment {} deleted", transaction_id),
                    message: "Payment deleted successfully".to_string(),
                    success: true,
                };
                Ok(Json(response))
            } else {
                warn!("Payment with ID {} not found for deletion", transaction_id);
                Err(StatusCode::NOT_FOUND)
            }
        }
        Err(db_error) => {
            error!(
                "Failed to delete payment with ID {}: {}",
                transaction_id, db_error
            );
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
