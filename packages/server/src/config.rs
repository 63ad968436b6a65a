use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Firm identity used in outbound notifications.
#[derive(Debug, Clone)]
pub struct BusinessProfile {
    pub name: String,
    pub phone: String,
    pub email_from: String,
    pub email_reply_to: String,
    pub admin_email: String,
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self {
            name: "법무법인 더율".to_string(),
            phone: "02-1234-5678".to_string(),
            email_from: "법무법인 더율 <info@theyool.com>".to_string(),
            email_reply_to: "info@theyool.com".to_string(),
            admin_email: "admin@theyool.com".to_string(),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub admin_api_token: String,
    pub cron_secret: Option<String>,
    pub resend_api_key: Option<String>,
    pub solapi_api_key: Option<String>,
    pub solapi_api_secret: Option<String>,
    pub solapi_from_number: Option<String>,
    pub business: BusinessProfile,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = BusinessProfile::default();
        let business = BusinessProfile {
            name: env::var("BUSINESS_NAME").unwrap_or(defaults.name),
            phone: env::var("BUSINESS_PHONE").unwrap_or(defaults.phone),
            email_from: env::var("EMAIL_FROM").unwrap_or(defaults.email_from),
            email_reply_to: env::var("EMAIL_REPLY_TO").unwrap_or(defaults.email_reply_to),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or(defaults.admin_email),
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            admin_api_token: env::var("ADMIN_API_TOKEN")
                .context("ADMIN_API_TOKEN must be set")?,
            cron_secret: env::var("CRON_SECRET").ok(),
            resend_api_key: env::var("RESEND_API_KEY").ok(),
            solapi_api_key: env::var("SOLAPI_API_KEY").ok(),
            solapi_api_secret: env::var("SOLAPI_API_SECRET").ok(),
            solapi_from_number: env::var("SOLAPI_FROM_NUMBER").ok(),
            business,
        })
    }
}
