//! Auto-confirmation batch.
//!
//! Confirms pending bookings that have sat unreviewed for 24 hours, unless
//! a confirmed booking already holds the same slot at the same office. Runs
//! from a cron endpoint; one booking's failure never aborts the batch.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::common::time::format_hhmm;
use crate::domains::notifications::{dispatch, NotificationEvent};
use crate::domains::scheduling::models::{Booking, BookingStatus};
use crate::kernel::ServerDeps;

const REVIEW_GRACE_HOURS: i64 = 24;

#[derive(Debug, Serialize)]
pub struct AutoConfirmDetail {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AutoConfirmReport {
    pub message: String,
    pub total_processed: usize,
    pub confirmed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub details: Vec<AutoConfirmDetail>,
    pub timestamp: DateTime<Utc>,
}

pub async fn run_auto_confirm(
    deps: &ServerDeps,
    now: DateTime<Utc>,
) -> Result<AutoConfirmReport, sqlx::Error> {
    let cutoff = now - Duration::hours(REVIEW_GRACE_HOURS);
    let pending = Booking::find_pending_created_before(cutoff, &deps.db_pool).await?;

    let mut confirmed = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut details = Vec::with_capacity(pending.len());

    for booking in &pending {
        match auto_confirm_one(booking, deps, now).await {
            Ok(Some(updated)) => {
                confirmed += 1;
                details.push(AutoConfirmDetail {
                    id: updated.id,
                    name: updated.name.clone(),
                    date: Some(updated.preferred_date),
                    time: Some(format_hhmm(updated.preferred_time)),
                    status: "confirmed",
                    reason: None,
                    error: None,
                });
            }
            Ok(None) => {
                skipped += 1;
                details.push(AutoConfirmDetail {
                    id: booking.id,
                    name: booking.name.clone(),
                    date: Some(booking.preferred_date),
                    time: Some(format_hhmm(booking.preferred_time)),
                    status: "skipped",
                    reason: Some("conflict"),
                    error: None,
                });
            }
            Err(e) => {
                tracing::error!(booking_id = %booking.id, "Auto-confirm failed: {}", e);
                failed += 1;
                details.push(AutoConfirmDetail {
                    id: booking.id,
                    name: booking.name.clone(),
                    date: None,
                    time: None,
                    status: "failed",
                    reason: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let message = if pending.is_empty() {
        "No pending bookings to process".to_string()
    } else {
        "Auto-confirmation completed".to_string()
    };

    Ok(AutoConfirmReport {
        message,
        total_processed: pending.len(),
        confirmed,
        skipped,
        failed,
        details,
        timestamp: now,
    })
}

/// Confirm one booking; Ok(None) means a conflicting confirmed booking
/// already holds the slot.
async fn auto_confirm_one(
    booking: &Booking,
    deps: &ServerDeps,
    now: DateTime<Utc>,
) -> Result<Option<Booking>, sqlx::Error> {
    let conflict = Booking::has_confirmed_conflict(
        booking.preferred_date,
        booking.preferred_time,
        booking.office_location,
        booking.id,
        &deps.db_pool,
    )
    .await?;
    if conflict {
        return Ok(None);
    }

    let mut updated = Booking::update_status(booking.id, BookingStatus::Confirmed, &deps.db_pool)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    let marker = format!("[자동 확정: {}]", now.to_rfc3339());
    let notes = match &updated.admin_notes {
        Some(existing) => format!("{}\n\n{}", existing, marker),
        None => marker,
    };
    updated = Booking::update_admin_notes(updated.id, &notes, &deps.db_pool)
        .await?
        .ok_or(sqlx::Error::RowNotFound)?;

    // Best-effort: the confirmation stands even if nobody could be told.
    let result = dispatch(NotificationEvent::Confirmed, &updated, &deps.notifier).await;
    if !result.success() {
        tracing::warn!(booking_id = %updated.id, "Auto-confirmed booking could not be notified");
    }

    Ok(Some(updated))
}
