// TestDependencies - mock implementations for testing
//
// Provides mock notification providers that can be injected into
// NotifierDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::{BaseEmailSender, BaseSmsSender, NotifierDeps, OutboundEmail};
use crate::config::BusinessProfile;

// =============================================================================
// Mock Email Sender
// =============================================================================

pub struct MockEmailSender {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    fail_with: Option<String>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    /// A sender whose every attempt fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(message.to_string()),
        }
    }

    /// Emails delivered so far, in send order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseEmailSender for MockEmailSender {
    async fn send_email(&self, email: &OutboundEmail) -> Result<()> {
        if let Some(message) = &self.fail_with {
            return Err(anyhow::anyhow!("{}", message));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

// =============================================================================
// Mock SMS Sender
// =============================================================================

pub struct MockSmsSender {
    sent: Arc<Mutex<Vec<(String, String)>>>,
    fail_all: Option<String>,
    fail_for: Mutex<Vec<(String, String)>>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_all: None,
            fail_for: Mutex::new(Vec::new()),
        }
    }

    /// A sender whose every attempt fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_all: Some(message.to_string()),
            fail_for: Mutex::new(Vec::new()),
        }
    }

    /// Fail only attempts to `phone` (e.g. a malformed destination the
    /// provider rejects); everything else is delivered.
    pub fn with_failure_for(self, phone: &str, message: &str) -> Self {
        self.fail_for
            .lock()
            .unwrap()
            .push((phone.to_string(), message.to_string()));
        self
    }

    /// `(phone, text)` pairs delivered so far, in send order.
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseSmsSender for MockSmsSender {
    async fn send_sms(&self, phone: &str, text: &str) -> Result<()> {
        if let Some(message) = &self.fail_all {
            return Err(anyhow::anyhow!("{}", message));
        }
        if let Some((_, message)) = self
            .fail_for
            .lock()
            .unwrap()
            .iter()
            .find(|(p, _)| p == phone)
        {
            return Err(anyhow::anyhow!("{}", message.clone()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), text.to_string()));
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Both mocks wired into a NotifierDeps, with handles kept for assertions.
pub struct TestDependencies {
    pub email: Arc<MockEmailSender>,
    pub sms: Arc<MockSmsSender>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            email: Arc::new(MockEmailSender::new()),
            sms: Arc::new(MockSmsSender::new()),
        }
    }

    pub fn deps(&self) -> NotifierDeps {
        NotifierDeps {
            email: Some(self.email.clone()),
            sms: Some(self.sms.clone()),
            business: BusinessProfile::default(),
        }
    }
}
