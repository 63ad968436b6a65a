//! Server dependencies (using traits for testability)
//!
//! This module provides the dependency containers used by handlers and
//! jobs. The notification providers sit behind trait abstractions so the
//! dispatcher can be exercised with mocks.

use anyhow::Result;
use async_trait::async_trait;
use resend::{EmailMessage, ResendService};
use solapi::SolapiService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::BusinessProfile;
use crate::kernel::{BaseEmailSender, BaseSmsSender, OutboundEmail};

// =============================================================================
// ResendService Adapter (implements BaseEmailSender trait)
// =============================================================================

/// Wrapper around ResendService that implements the BaseEmailSender trait
/// and stamps the firm's sender identity onto every message.
pub struct ResendAdapter {
    service: Arc<ResendService>,
    from: String,
    reply_to: String,
}

impl ResendAdapter {
    pub fn new(service: Arc<ResendService>, from: String, reply_to: String) -> Self {
        Self {
            service,
            from,
            reply_to,
        }
    }
}

#[async_trait]
impl BaseEmailSender for ResendAdapter {
    async fn send_email(&self, email: &OutboundEmail) -> Result<()> {
        self.service
            .send(&EmailMessage {
                from: self.from.clone(),
                to: email.to.clone(),
                reply_to: Some(self.reply_to.clone()),
                subject: email.subject.clone(),
                html: email.html.clone(),
            })
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// SolapiService Adapter (implements BaseSmsSender trait)
// =============================================================================

/// Wrapper around SolapiService that implements the BaseSmsSender trait.
pub struct SolapiAdapter {
    service: Arc<SolapiService>,
    lms_subject: String,
}

impl SolapiAdapter {
    pub fn new(service: Arc<SolapiService>, lms_subject: String) -> Self {
        Self {
            service,
            lms_subject,
        }
    }
}

#[async_trait]
impl BaseSmsSender for SolapiAdapter {
    async fn send_sms(&self, phone: &str, text: &str) -> Result<()> {
        // Korean carriers cap plain SMS at 90 bytes; longer copy goes out
        // as LMS with a subject line.
        let result = if text.len() > 90 {
            self.service.send_lms(phone, text, &self.lms_subject).await
        } else {
            self.service.send_sms(phone, text).await
        };

        result.map(|_| ()).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// NotifierDeps / ServerDeps
// =============================================================================

/// Everything the notification dispatcher needs. No database handle, so
/// tests construct this directly with mocks.
#[derive(Clone)]
pub struct NotifierDeps {
    /// None when the email provider is unconfigured. Email attempts are
    /// then skipped, not failed.
    pub email: Option<Arc<dyn BaseEmailSender>>,
    /// None when the SMS provider is unconfigured.
    pub sms: Option<Arc<dyn BaseSmsSender>>,
    pub business: BusinessProfile,
}

/// Server dependencies accessible to handlers and jobs
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub notifier: NotifierDeps,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, notifier: NotifierDeps) -> Self {
        Self { db_pool, notifier }
    }
}
