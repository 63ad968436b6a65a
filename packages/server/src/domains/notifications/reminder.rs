//! The daily reminder batch.
//!
//! Runs over every confirmed booking for tomorrow and dispatches the
//! reminder event per booking. One booking's failure is recorded and the
//! batch moves on; each day's run is independent and remembers nothing
//! from the day before, so there is deliberately no duplicate-send guard.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::common::time::format_hhmm;
use crate::domains::scheduling::models::Booking;
use crate::kernel::NotifierDeps;

use super::dispatcher::{dispatch, NotificationEvent};

#[derive(Debug, Serialize)]
pub struct ReminderDetail {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(rename = "emailSent", skip_serializing_if = "Option::is_none")]
    pub email_sent: Option<bool>,
    #[serde(rename = "smsSent", skip_serializing_if = "Option::is_none")]
    pub sms_sent: Option<bool>,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReminderReport {
    pub message: String,
    pub total_bookings: usize,
    pub sent: usize,
    pub failed: usize,
    pub details: Vec<ReminderDetail>,
    pub timestamp: DateTime<Utc>,
}

/// Dispatch reminders for every booking in the batch.
pub async fn run_reminder_batch(bookings: &[Booking], deps: &NotifierDeps) -> ReminderReport {
    let mut sent = 0usize;
    let mut failed = 0usize;
    let mut details = Vec::with_capacity(bookings.len());

    for booking in bookings {
        let result = dispatch(NotificationEvent::Reminder, booking, deps).await;

        if result.success() {
            sent += 1;
            details.push(ReminderDetail {
                id: booking.id,
                name: booking.name.clone(),
                date: Some(booking.preferred_date),
                time: Some(format_hhmm(booking.preferred_time)),
                email_sent: Some(result.email.is_sent()),
                sms_sent: Some(result.sms.is_sent()),
                status: "sent",
                error: None,
            });
        } else {
            failed += 1;
            details.push(ReminderDetail {
                id: booking.id,
                name: booking.name.clone(),
                date: None,
                time: None,
                email_sent: None,
                sms_sent: None,
                status: "failed",
                error: result.first_error().or_else(|| Some("Unknown error".to_string())),
            });
        }
    }

    let message = if bookings.is_empty() {
        "No bookings scheduled for tomorrow".to_string()
    } else {
        "Reminder notifications completed".to_string()
    };

    ReminderReport {
        message,
        total_bookings: bookings.len(),
        sent,
        failed,
        details,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::BusinessProfile;
    use crate::kernel::{MockSmsSender, NotifierDeps, TestDependencies};

    use super::*;

    #[tokio::test]
    async fn one_bad_destination_does_not_abort_the_batch() {
        // Three confirmed bookings; the second has a number the provider
        // rejects. Email is unconfigured, so SMS decides each outcome.
        let mut first = Booking::fixture();
        first.phone = "010-1111-2222".to_string();
        let mut second = Booking::fixture();
        second.phone = "010-0000-0000".to_string();
        let mut third = Booking::fixture();
        third.phone = "010-3333-4444".to_string();

        let sms = Arc::new(
            MockSmsSender::new().with_failure_for("010-0000-0000", "invalid recipient"),
        );
        let deps = NotifierDeps {
            email: None,
            sms: Some(sms.clone()),
            business: BusinessProfile::default(),
        };

        let bookings = vec![first, second.clone(), third];
        let report = run_reminder_batch(&bookings, &deps).await;

        assert_eq!(report.total_bookings, 3);
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(report.details.len(), 3);

        let failure = &report.details[1];
        assert_eq!(failure.id, second.id);
        assert_eq!(failure.status, "failed");
        assert_eq!(failure.error.as_deref(), Some("invalid recipient"));

        // The third booking was still attempted after the failure.
        assert_eq!(sms.sent().len(), 2);
        assert_eq!(sms.sent()[1].0, "010-3333-4444");
    }

    #[tokio::test]
    async fn empty_batch_reports_zero_counts() {
        let test_deps = TestDependencies::new();
        let report = run_reminder_batch(&[], &test_deps.deps()).await;

        assert_eq!(report.total_bookings, 0);
        assert_eq!(report.sent, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(report.message, "No bookings scheduled for tomorrow");
    }

    #[tokio::test]
    async fn detail_rows_carry_per_channel_outcomes() {
        let test_deps = TestDependencies::new();
        let booking = Booking::fixture();

        let report = run_reminder_batch(std::slice::from_ref(&booking), &test_deps.deps()).await;

        assert_eq!(report.sent, 1);
        let detail = &report.details[0];
        assert_eq!(detail.status, "sent");
        assert_eq!(detail.email_sent, Some(true));
        assert_eq!(detail.sms_sent, Some(true));
        assert_eq!(detail.time.as_deref(), Some("10:30"));
    }
}
