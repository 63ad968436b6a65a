// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "dispatch a booking event") should be domain
// functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseEmailSender)

use anyhow::Result;
use async_trait::async_trait;

/// A fully rendered outbound email. Sender identity (from / reply-to) is
/// the provider adapter's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

// =============================================================================
// Email Sender Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseEmailSender: Send + Sync {
    /// Deliver one email. A provider rejection surfaces as Err.
    async fn send_email(&self, email: &OutboundEmail) -> Result<()>;
}

// =============================================================================
// SMS Sender Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseSmsSender: Send + Sync {
    /// Deliver one text message to a Korean mobile number.
    async fn send_sms(&self, phone: &str, text: &str) -> Result<()>;
}
