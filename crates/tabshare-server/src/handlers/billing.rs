//! Bill splitting handler

use std::collections::BTreeMap;

use axum::Json;
use serde::Deserialize;

use crate::AppError;
use tabshare_core::billing::{split_amounts, MemberAmount, SubItemRef};
use tabshare_core::receipt::ReceiptAnalysis;

/// Request body for bill splitting
#[derive(Debug, Deserialize)]
pub struct SplitRequest {
    /// A reconciled receipt, as returned by the analyze endpoints
    pub receipt: ReceiptAnalysis,
    /// Member name -> claimed sub-items
    pub assignments: BTreeMap<String, Vec<SubItemRef>>,
}

/// POST /api/billing/split - Per-member amounts for an assigned receipt
pub async fn split_bill(
    Json(request): Json<SplitRequest>,
) -> Result<Json<Vec<MemberAmount>>, AppError> {
    if request.assignments.is_empty() {
        return Err(AppError::bad_request("assignments must not be empty"));
    }

    Ok(Json(split_amounts(&request.receipt, &request.assignments)))
}
