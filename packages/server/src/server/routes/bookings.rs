//! Booking endpoints: public submission plus the admin read/transition
//! surface.

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate, NaiveTime};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::time::hhmm;
use crate::domains::scheduling::actions::{create_booking, update_booking_status, UpdateBookingInput};
use crate::domains::scheduling::models::{
    Booking, BookingFilter, Channel, CreateBookingInput, Office,
};
use crate::domains::scheduling::SchedulingError;
use crate::server::app::AppState;
use crate::server::middleware::AdminAuth;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub channel: Channel,
    #[serde(default)]
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    pub preferred_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub preferred_time: NaiveTime,
    #[serde(default)]
    pub office_location: Option<Office>,
}

/// POST /api/bookings
/// Create a new consultation booking
pub async fn create_booking_handler(
    Extension(state): Extension<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let input = CreateBookingInput {
        channel: request.channel,
        name: request.name,
        phone: request.phone,
        email: request.email,
        category: request.category,
        message: request.message,
        preferred_date: request.preferred_date,
        preferred_time: request.preferred_time,
        office_location: request.office_location,
    };

    let now = Local::now().naive_local();
    let (booking, notification) = create_booking(input, &state.deps, now).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "booking": booking,
            "notification": notification,
            "message": "상담 예약이 접수되었습니다. 담당자가 확인 후 연락드리겠습니다.",
        })),
    ))
}

/// GET /api/bookings
/// List bookings with filters (ADMIN ONLY)
pub async fn list_bookings_handler(
    _admin: AdminAuth,
    Extension(state): Extension<AppState>,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Value>, ApiError> {
    let bookings = Booking::find_all(&filter, &state.db_pool).await?;

    Ok(Json(json!({
        "success": true,
        "data": bookings,
        "count": bookings.len(),
    })))
}

/// GET /api/bookings/:id
/// Get a single booking (ADMIN ONLY)
pub async fn get_booking_handler(
    _admin: AdminAuth,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let booking = Booking::find_by_id(id, &state.db_pool)
        .await?
        .ok_or(SchedulingError::NotFound)?;

    Ok(Json(json!({ "success": true, "data": booking })))
}

/// PATCH /api/bookings/:id
/// Transition a booking and/or update admin notes (ADMIN ONLY)
pub async fn update_booking_handler(
    _admin: AdminAuth,
    Extension(state): Extension<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBookingInput>,
) -> Result<Json<Value>, ApiError> {
    let (booking, notification) = update_booking_status(id, input, &state.deps).await?;

    Ok(Json(json!({
        "success": true,
        "data": booking,
        "notification": notification,
        "message": "상담 정보가 수정되었습니다",
    })))
}
