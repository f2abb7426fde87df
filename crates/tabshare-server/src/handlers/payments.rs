//! PayPal settlement handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{AppError, AppState};
use tabshare_core::error::Error;
use tabshare_core::paypal::{OrderCaptured, OrderCreated};

/// Request body for order creation
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount as a 2-decimal string, e.g. "12.69"
    pub value: String,
    /// ISO currency code, defaults to USD
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// POST /api/payments/orders - Create a PayPal order
pub async fn create_payment_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<OrderCreated>, AppError> {
    let Some(paypal) = &state.paypal else {
        return Err(AppError::unavailable(
            "PayPal not configured (set PAYPAL_CLIENT_ID / PAYPAL_CLIENT_SECRET)",
        ));
    };

    if request.value.trim().is_empty() || request.value.parse::<f64>().unwrap_or(0.0) <= 0.0 {
        return Err(AppError::bad_request("value must be a positive amount"));
    }

    let order = paypal
        .create_order(&request.value, &request.currency)
        .await
        .map_err(payment_error)?;

    info!(order_id = %order.id, value = %request.value, "payment order created");
    Ok(Json(order))
}

/// POST /api/payments/orders/:id/capture - Capture an approved order
pub async fn capture_payment_order(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderCaptured>, AppError> {
    let Some(paypal) = &state.paypal else {
        return Err(AppError::unavailable(
            "PayPal not configured (set PAYPAL_CLIENT_ID / PAYPAL_CLIENT_SECRET)",
        ));
    };

    let order = paypal
        .capture_order(&order_id)
        .await
        .map_err(payment_error)?;

    info!(order_id = %order.id, status = %order.status, "payment order captured");
    Ok(Json(order))
}

/// PayPal failures are upstream errors; the provider's response body
/// stays in the logs, not the client response.
fn payment_error(err: Error) -> AppError {
    match err {
        Error::Payment(_) => AppError::bad_gateway("Payment provider request failed", err.into()),
        other => other.into(),
    }
}
