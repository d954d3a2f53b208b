//! Visitor lifecycle endpoints

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::visit::{CreateAdvanceVisit, CreateVisit, Visit},
};

use super::client_ip;

/// Check-in response with the persisted record
#[derive(Serialize, ToSchema)]
pub struct CheckInResponse {
    pub visit: Visit,
    /// Whether the arrival notification was accepted by the webhook.
    /// The check-in itself succeeded either way.
    pub notification_sent: bool,
    pub message: String,
}

/// Pre-registration response
#[derive(Serialize, ToSchema)]
pub struct PendingResponse {
    pub visit: Visit,
    pub message: String,
}

/// Live roster response
#[derive(Serialize, ToSchema)]
pub struct RecordsResponse {
    /// Non-pending visits, most recent check-in first
    pub active: Vec<Visit>,
    /// Pre-registrations awaiting arrival, soonest first
    pub pending: Vec<Visit>,
    /// Badges offerable right now, the no-badge sentinel first
    pub available_badges: Vec<String>,
    pub current_occupancy: i64,
}

#[derive(Serialize, ToSchema)]
pub struct OccupancyResponse {
    pub current_occupancy: i64,
}

/// Badge assignment for promoting a pending visit
#[derive(Deserialize, ToSchema)]
pub struct PromoteRequest {
    pub badge_number: String,
}

#[derive(Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/// Walk-in check-in
#[utoipa::path(
    post,
    path = "/checkin",
    tag = "visits",
    request_body = CreateVisit,
    responses(
        (status = 201, description = "Visitor checked in", body = CheckInResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn check_in(
    State(state): State<crate::AppState>,
    Json(request): Json<CreateVisit>,
) -> AppResult<(StatusCode, Json<CheckInResponse>)> {
    let (visit, notification_sent) = state.services.visits.create_walk_in(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckInResponse {
            visit,
            notification_sent,
            message: "Visitor checked in successfully".to_string(),
        }),
    ))
}

/// Employee pre-registration of an expected guest
#[utoipa::path(
    post,
    path = "/advance-checkin",
    tag = "visits",
    request_body = CreateAdvanceVisit,
    responses(
        (status = 201, description = "Visitor pre-registered", body = PendingResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn advance_check_in(
    State(state): State<crate::AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<CreateAdvanceVisit>,
) -> AppResult<(StatusCode, Json<PendingResponse>)> {
    let submitter_ip = Some(client_ip(&headers, peer));
    let visit = state.services.visits.create_advance(request, submitter_ip).await?;

    Ok((
        StatusCode::CREATED,
        Json(PendingResponse {
            visit,
            message: "Advance check-in submitted successfully".to_string(),
        }),
    ))
}

/// Vendor-portal pre-registration; visitor type is forced to Vendor
#[utoipa::path(
    post,
    path = "/vendor-portal",
    tag = "visits",
    request_body = CreateAdvanceVisit,
    responses(
        (status = 201, description = "Vendor visit pre-registered", body = PendingResponse),
        (status = 400, description = "Missing or invalid fields")
    )
)]
pub async fn vendor_portal(
    State(state): State<crate::AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(request): Json<CreateAdvanceVisit>,
) -> AppResult<(StatusCode, Json<PendingResponse>)> {
    let submitter_ip = Some(client_ip(&headers, peer));
    let visit = state.services.visits.create_vendor(request, submitter_ip).await?;

    Ok((
        StatusCode::CREATED,
        Json(PendingResponse {
            visit,
            message: "Vendor visit pre-registered successfully".to_string(),
        }),
    ))
}

/// Live roster: active visits, pending arrivals, and offerable badges
#[utoipa::path(
    get,
    path = "/records",
    tag = "visits",
    responses(
        (status = 200, description = "Current visitor records", body = RecordsResponse)
    )
)]
pub async fn records(
    State(state): State<crate::AppState>,
) -> AppResult<Json<RecordsResponse>> {
    let active = state.services.visits.list_active().await?;
    let pending = state.services.visits.list_pending().await?;
    let available_badges = state.services.visits.available_badges().await?;
    let current_occupancy = state.services.visits.current_occupancy().await;

    Ok(Json(RecordsResponse {
        active,
        pending,
        available_badges,
        current_occupancy,
    }))
}

/// Count of visitors currently on-site
#[utoipa::path(
    get,
    path = "/occupancy",
    tag = "visits",
    responses(
        (status = 200, description = "Current occupancy", body = OccupancyResponse)
    )
)]
pub async fn occupancy(State(state): State<crate::AppState>) -> Json<OccupancyResponse> {
    Json(OccupancyResponse {
        current_occupancy: state.services.visits.current_occupancy().await,
    })
}

/// Check out a visitor
#[utoipa::path(
    post,
    path = "/checkout/{visitor_id}",
    tag = "visits",
    params(
        ("visitor_id" = i32, Path, description = "Visitor ID")
    ),
    responses(
        (status = 200, description = "Visitor checked out", body = StatusResponse),
        (status = 409, description = "Visitor not found or already checked out")
    )
)]
pub async fn checkout(
    State(state): State<crate::AppState>,
    Path(visitor_id): Path<i32>,
) -> AppResult<Json<StatusResponse>> {
    state.services.visits.checkout(visitor_id).await?;

    Ok(Json(StatusResponse {
        status: "checked_out".to_string(),
        message: "Visitor checked out successfully".to_string(),
    }))
}

/// Promote a pending visit to checked-in, assigning a badge
#[utoipa::path(
    post,
    path = "/checkin-pending/{visitor_id}",
    tag = "visits",
    params(
        ("visitor_id" = i32, Path, description = "Visitor ID")
    ),
    request_body = PromoteRequest,
    responses(
        (status = 200, description = "Pending visitor checked in", body = StatusResponse),
        (status = 400, description = "Missing badge number"),
        (status = 409, description = "Visitor not found or already checked in")
    )
)]
pub async fn promote_pending(
    State(state): State<crate::AppState>,
    Path(visitor_id): Path<i32>,
    Json(request): Json<PromoteRequest>,
) -> AppResult<Json<StatusResponse>> {
    state
        .services
        .visits
        .promote_pending(visitor_id, &request.badge_number)
        .await?;

    Ok(Json(StatusResponse {
        status: "checked_in".to_string(),
        message: "Visitor checked in successfully".to_string(),
    }))
}
