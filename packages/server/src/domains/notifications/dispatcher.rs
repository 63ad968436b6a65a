//! Notification dispatch.
//!
//! Fans a booking lifecycle event out to the email and SMS channels. The
//! channels are two independent result-returning attempts combined by a
//! pure aggregation rule (success = at least one channel sent); a failure
//! on one channel never prevents the other from being attempted, and no
//! retry happens here.

use serde::Serialize;

use crate::domains::scheduling::models::Booking;
use crate::kernel::{NotifierDeps, OutboundEmail};

use super::templates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    Created,
    Confirmed,
    Cancelled,
    Reminder,
}

impl NotificationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationEvent::Created => "created",
            NotificationEvent::Confirmed => "confirmed",
            NotificationEvent::Cancelled => "cancelled",
            NotificationEvent::Reminder => "reminder",
        }
    }
}

/// What happened on one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    Sent,
    /// Channel unconfigured or the booking has no destination for it.
    Skipped,
    Failed(String),
}

impl ChannelOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, ChannelOutcome::Sent)
    }

    fn error(&self) -> Option<&str> {
        match self {
            ChannelOutcome::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub email: ChannelOutcome,
    pub sms: ChannelOutcome,
}

impl DispatchResult {
    /// A booking counts as notified when at least one channel went out.
    pub fn success(&self) -> bool {
        self.email.is_sent() || self.sms.is_sent()
    }

    /// First channel error, if any, for aggregate reports.
    pub fn first_error(&self) -> Option<String> {
        self.email
            .error()
            .or_else(|| self.sms.error())
            .map(str::to_string)
    }

    pub fn summary(&self) -> NotificationSummary {
        NotificationSummary {
            success: self.success(),
            email_sent: self.email.is_sent(),
            sms_sent: self.sms.is_sent(),
            error: self.first_error(),
        }
    }
}

/// Wire-facing view of a dispatch result.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationSummary {
    pub success: bool,
    #[serde(rename = "emailSent")]
    pub email_sent: bool,
    #[serde(rename = "smsSent")]
    pub sms_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Dispatch `event` for `booking` across both channels.
pub async fn dispatch(
    event: NotificationEvent,
    booking: &Booking,
    deps: &NotifierDeps,
) -> DispatchResult {
    let email = attempt_email(event, booking, deps).await;
    let sms = attempt_sms(event, booking, deps).await;

    let result = DispatchResult { email, sms };
    tracing::info!(
        booking_id = %booking.id,
        event = event.as_str(),
        success = result.success(),
        "Notification dispatched"
    );
    result
}

async fn attempt_email(
    event: NotificationEvent,
    booking: &Booking,
    deps: &NotifierDeps,
) -> ChannelOutcome {
    let Some(sender) = &deps.email else {
        return ChannelOutcome::Skipped;
    };

    // New bookings also raise an internal alert; its failure is logged but
    // only the customer attempt decides the channel outcome.
    if event == NotificationEvent::Created {
        let alert = OutboundEmail {
            to: deps.business.admin_email.clone(),
            subject: templates::admin_alert_subject(booking),
            html: templates::admin_alert_body(booking),
        };
        if let Err(e) = sender.send_email(&alert).await {
            tracing::error!(booking_id = %booking.id, "Failed to send admin alert email: {}", e);
        }
    }

    let Some(address) = &booking.email else {
        return ChannelOutcome::Skipped;
    };

    let email = OutboundEmail {
        to: address.clone(),
        subject: templates::email_subject(event, &deps.business),
        html: templates::email_body(event, booking, &deps.business),
    };

    match sender.send_email(&email).await {
        Ok(()) => ChannelOutcome::Sent,
        Err(e) => {
            tracing::error!(
                booking_id = %booking.id,
                event = event.as_str(),
                "Failed to send email: {}",
                e
            );
            ChannelOutcome::Failed(e.to_string())
        }
    }
}

async fn attempt_sms(
    event: NotificationEvent,
    booking: &Booking,
    deps: &NotifierDeps,
) -> ChannelOutcome {
    let Some(sender) = &deps.sms else {
        return ChannelOutcome::Skipped;
    };

    let text = templates::sms_text(event, booking, &deps.business);
    match sender.send_sms(&booking.phone, &text).await {
        Ok(()) => ChannelOutcome::Sent,
        Err(e) => {
            tracing::error!(
                booking_id = %booking.id,
                event = event.as_str(),
                "Failed to send SMS: {}",
                e
            );
            ChannelOutcome::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::BusinessProfile;
    use crate::kernel::{MockEmailSender, MockSmsSender, NotifierDeps, TestDependencies};

    use super::*;

    #[tokio::test]
    async fn both_channels_sent_when_configured() {
        let test_deps = TestDependencies::new();
        let booking = Booking::fixture();

        let result = dispatch(NotificationEvent::Confirmed, &booking, &test_deps.deps()).await;

        assert!(result.success());
        assert!(result.email.is_sent());
        assert!(result.sms.is_sent());
        assert_eq!(test_deps.sms.sent().len(), 1);
        assert_eq!(test_deps.sms.sent()[0].0, booking.phone);
    }

    #[tokio::test]
    async fn email_failure_does_not_block_sms() {
        let sms = Arc::new(MockSmsSender::new());
        let deps = NotifierDeps {
            email: Some(Arc::new(MockEmailSender::failing("provider unreachable"))),
            sms: Some(sms.clone()),
            business: BusinessProfile::default(),
        };
        let booking = Booking::fixture();

        let result = dispatch(NotificationEvent::Confirmed, &booking, &deps).await;

        assert!(matches!(result.email, ChannelOutcome::Failed(_)));
        assert!(result.sms.is_sent());
        // One delivered channel is enough.
        assert!(result.success());
        assert_eq!(sms.sent().len(), 1);

        let summary = result.summary();
        assert!(summary.success);
        assert!(!summary.email_sent);
        assert!(summary.sms_sent);
        assert!(summary.error.is_some());
    }

    #[tokio::test]
    async fn missing_email_address_skips_email_channel() {
        let test_deps = TestDependencies::new();
        let mut booking = Booking::fixture();
        booking.email = None;

        let result = dispatch(NotificationEvent::Reminder, &booking, &test_deps.deps()).await;

        assert_eq!(result.email, ChannelOutcome::Skipped);
        assert!(result.sms.is_sent());
        assert!(result.success());
        assert!(test_deps.email.sent().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_providers_skip_everything() {
        let deps = NotifierDeps {
            email: None,
            sms: None,
            business: BusinessProfile::default(),
        };
        let booking = Booking::fixture();

        let result = dispatch(NotificationEvent::Created, &booking, &deps).await;

        assert_eq!(result.email, ChannelOutcome::Skipped);
        assert_eq!(result.sms, ChannelOutcome::Skipped);
        assert!(!result.success());
    }

    #[tokio::test]
    async fn both_failures_mean_no_success() {
        let deps = NotifierDeps {
            email: Some(Arc::new(MockEmailSender::failing("smtp down"))),
            sms: Some(Arc::new(MockSmsSender::failing("gateway down"))),
            business: BusinessProfile::default(),
        };
        let booking = Booking::fixture();

        let result = dispatch(NotificationEvent::Cancelled, &booking, &deps).await;

        assert!(!result.success());
        assert_eq!(result.first_error().as_deref(), Some("smtp down"));
    }

    #[tokio::test]
    async fn created_event_sends_admin_alert_before_customer_email() {
        let test_deps = TestDependencies::new();
        let booking = Booking::fixture();

        let result = dispatch(NotificationEvent::Created, &booking, &test_deps.deps()).await;

        assert!(result.success());
        let sent = test_deps.email.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, BusinessProfile::default().admin_email);
        assert!(sent[0].subject.starts_with("[신규 예약]"));
        assert_eq!(sent[1].to, "client@example.com");
    }

    #[tokio::test]
    async fn admin_alert_still_attempted_without_customer_email() {
        let test_deps = TestDependencies::new();
        let mut booking = Booking::fixture();
        booking.email = None;

        let result = dispatch(NotificationEvent::Created, &booking, &test_deps.deps()).await;

        // Customer channel skipped, alert delivered anyway.
        assert_eq!(result.email, ChannelOutcome::Skipped);
        assert_eq!(test_deps.email.sent().len(), 1);
        assert_eq!(
            test_deps.email.sent()[0].to,
            BusinessProfile::default().admin_email
        );
    }
}
