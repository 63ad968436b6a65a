//! Availability endpoint backing the client's date/time picker.

use axum::{
    extract::{Extension, Query},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::common::time::format_hhmm;
use crate::domains::scheduling::availability::{resolve, CALENDAR_SCAN_CAP};
use crate::domains::scheduling::models::{BlockedTime, Office};
use crate::server::app::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(default)]
    pub office: Option<Office>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DaySlots {
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

/// GET /api/availability
pub async fn availability_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Value>, ApiError> {
    let now = Local::now().naive_local();
    // Windows never open in the past.
    let window_start = query.start.map_or(now.date(), |start| start.max(now.date()));

    let rules = BlockedTime::find_from(window_start, &state.db_pool).await?;
    let days: Vec<DaySlots> = resolve(window_start, CALENDAR_SCAN_CAP, query.office, &rules, now)
        .into_iter()
        .map(|day| DaySlots {
            date: day.date,
            slots: day.slots.into_iter().map(format_hhmm).collect(),
        })
        .collect();

    Ok(Json(json!({
        "success": true,
        "office": query.office,
        "days": days,
    })))
}
