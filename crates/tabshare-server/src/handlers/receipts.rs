//! Receipt analysis handlers

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::{AppError, AppState, MAX_UPLOAD_SIZE};
use tabshare_core::receipt::{analyze_response, ReceiptAnalysis};
use tabshare_core::vision::VisionBackend;

/// POST /api/receipts/analyze - Extract and reconcile a receipt image
///
/// The body is the raw image bytes. The image goes to the vision backend
/// for extraction, and the completion text runs through the
/// reconciliation engine. Malformed model output never fails the
/// request; it degrades to the sentinel analysis.
pub async fn analyze_receipt(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<ReceiptAnalysis>, AppError> {
    let Some(vision) = &state.vision else {
        return Err(AppError::unavailable(
            "Vision backend not configured (set VISION_HOST)",
        ));
    };

    let model_override = request
        .headers()
        .get("x-vision-model")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = axum::body::to_bytes(request.into_body(), MAX_UPLOAD_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body or file too large (max 10MB)"))?;

    if bytes.is_empty() {
        return Err(AppError::bad_request("No image data provided"));
    }

    // Content hash identifies the upload in logs without storing the image
    let image_hash = hex::encode(Sha256::digest(&bytes));
    info!(
        image_hash = %image_hash,
        bytes = bytes.len(),
        model = model_override.as_deref().unwrap_or(vision.model()),
        "analyzing receipt image"
    );

    let raw_text = vision
        .extract_receipt(&bytes, model_override.as_deref())
        .await
        .map_err(|e| AppError::bad_gateway("Vision backend request failed", e.into()))?;

    let analysis = analyze_response(&raw_text);
    info!(
        image_hash = %image_hash,
        items = analysis.items.len(),
        needs_review = analysis.needs_review,
        "receipt analysis complete"
    );

    Ok(Json(analysis))
}

/// Request body for text-only reconciliation
#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    /// Raw completion text from a vision model
    pub raw_text: String,
}

/// POST /api/receipts/reconcile - Reconcile saved vision model output
///
/// Replay/debug path, also used by callers that run their own vision
/// models and only need the reconciliation engine.
pub async fn reconcile_receipt(
    Json(request): Json<ReconcileRequest>,
) -> Result<Json<ReceiptAnalysis>, AppError> {
    if request.raw_text.trim().is_empty() {
        return Err(AppError::bad_request("raw_text must not be empty"));
    }

    Ok(Json(analyze_response(&request.raw_text)))
}
