//! Common availability handler

use serde::Deserialize;

use crate::AppError;
use axum::Json;
use tabshare_core::availability::{
    find_common_availability, DayAvailability, MemberProfile, UpcomingEvent,
};

/// Request body for availability resolution
#[derive(Debug, Deserialize)]
pub struct CommonAvailabilityRequest {
    pub members: Vec<MemberProfile>,
    #[serde(default)]
    pub events: Vec<UpcomingEvent>,
}

/// POST /api/availability/common - Hours where every member is free
///
/// An empty member list is rejected: "everyone is free" over nobody
/// would claim all 168 slots, which is never what a caller wants.
pub async fn common_availability(
    Json(request): Json<CommonAvailabilityRequest>,
) -> Result<Json<Vec<DayAvailability>>, AppError> {
    if request.members.is_empty() {
        return Err(AppError::bad_request("members must not be empty"));
    }

    Ok(Json(find_common_availability(
        &request.members,
        &request.events,
    )))
}
