//! Cron endpoints.
//!
//! Time-triggered, non-interactive batches authorized by a shared secret
//! (`Authorization: Bearer <CRON_SECRET>`) rather than an admin session.
//! A missing secret is a deployment error (500); a mismatch is 401 and no
//! bookings are touched.

use axum::{
    extract::Extension,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use chrono::{Duration, Local, Utc};
use serde_json::{json, Value};

use crate::domains::notifications::{run_reminder_batch, ReminderReport};
use crate::domains::scheduling::actions::{run_auto_confirm, AutoConfirmReport};
use crate::domains::scheduling::models::Booking;
use crate::server::app::AppState;

type CronRejection = (StatusCode, Json<Value>);

fn authorize_cron(state: &AppState, headers: &HeaderMap) -> Result<(), CronRejection> {
    let Some(secret) = &state.cron_secret else {
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "CRON_SECRET not configured" })),
        ));
    };

    let expected = format!("Bearer {}", secret);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(header) if header == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )),
    }
}

fn internal_error(context: &str, error: impl std::fmt::Display) -> CronRejection {
    tracing::error!("{}: {}", context, error);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": context, "message": error.to_string() })),
    )
}

/// GET|POST /api/cron/send-reminders
///
/// Finds every confirmed booking for tomorrow and dispatches the reminder
/// event per booking. Running it twice the same day sends duplicates;
/// the schedule, not this endpoint, guarantees once-a-day.
pub async fn send_reminders_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<ReminderReport>, CronRejection> {
    authorize_cron(&state, &headers)?;

    let tomorrow = Local::now().date_naive() + Duration::days(1);
    let bookings = Booking::find_confirmed_on(tomorrow, &state.db_pool)
        .await
        .map_err(|e| internal_error("Reminder notification failed", e))?;

    tracing::info!(
        date = %tomorrow,
        count = bookings.len(),
        "Running reminder batch"
    );

    let report = run_reminder_batch(&bookings, &state.deps.notifier).await;
    Ok(Json(report))
}

/// GET|POST /api/cron/auto-confirm
///
/// Confirms pending bookings older than 24 hours unless the slot is
/// already held by a confirmed booking.
pub async fn auto_confirm_handler(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<AutoConfirmReport>, CronRejection> {
    authorize_cron(&state, &headers)?;

    let report = run_auto_confirm(&state.deps, Utc::now())
        .await
        .map_err(|e| internal_error("Auto-confirmation failed", e))?;

    tracing::info!(
        confirmed = report.confirmed,
        skipped = report.skipped,
        failed = report.failed,
        "Auto-confirm batch finished"
    );

    Ok(Json(report))
}
