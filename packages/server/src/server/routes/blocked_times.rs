//! Blocked-time management (ADMIN ONLY).

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::time::hhmm_option;
use crate::domains::scheduling::models::{
    BlockType, BlockedTime, BlockedTimeFilter, CreateBlockedTimeInput, Office,
};
use crate::server::app::AppState;
use crate::server::middleware::AdminAuth;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateBlockedTimeRequest {
    pub block_type: BlockType,
    pub blocked_date: NaiveDate,
    #[serde(default, with = "hhmm_option")]
    pub blocked_time_start: Option<NaiveTime>,
    #[serde(default, with = "hhmm_option")]
    pub blocked_time_end: Option<NaiveTime>,
    #[serde(default)]
    pub office_location: Option<Office>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// GET /api/admin/blocked-times
pub async fn list_blocked_times_handler(
    _admin: AdminAuth,
    Extension(state): Extension<AppState>,
    Query(filter): Query<BlockedTimeFilter>,
) -> Result<Json<Value>, ApiError> {
    let blocked_times = BlockedTime::find_all(&filter, &state.db_pool).await?;

    Ok(Json(json!({
        "success": true,
        "blockedTimes": blocked_times,
    })))
}

/// POST /api/admin/blocked-times
pub async fn create_blocked_time_handler(
    _admin: AdminAuth,
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateBlockedTimeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = CreateBlockedTimeInput {
        block_type: request.block_type,
        blocked_date: request.blocked_date,
        blocked_time_start: request.blocked_time_start,
        blocked_time_end: request.blocked_time_end,
        office_location: request.office_location,
        reason: request.reason,
    };
    let created_by = request.created_by.unwrap_or_else(|| "admin".to_string());

    let blocked_time = BlockedTime::create(input, &created_by, &state.db_pool).await?;
    tracing::info!(id = %blocked_time.id, date = %blocked_time.blocked_date, "Blocked time created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "blockedTime": blocked_time,
        })),
    ))
}

/// DELETE /api/admin/blocked-times/:id
pub async fn delete_blocked_time_handler(
    _admin: AdminAuth,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    BlockedTime::delete(id, &state.db_pool).await?;
    tracing::info!(%id, "Blocked time deleted");

    Ok(Json(json!({ "success": true })))
}
