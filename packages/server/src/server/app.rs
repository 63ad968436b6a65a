//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{delete, get, post},
    Router,
};
use resend::ResendService;
use solapi::{SolapiOptions, SolapiService};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::kernel::{
    BaseEmailSender, BaseSmsSender, NotifierDeps, ResendAdapter, ServerDeps, SolapiAdapter,
};
use crate::server::routes::{
    auto_confirm_handler, availability_handler, create_blocked_time_handler,
    create_booking_handler, delete_blocked_time_handler, get_booking_handler, health_handler,
    list_blocked_times_handler, list_bookings_handler, send_reminders_handler,
    update_booking_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
    pub admin_api_token: String,
    pub cron_secret: Option<String>,
}

/// Wire the notification providers from configuration. Either provider may
/// be absent; the dispatcher then skips that channel instead of failing.
fn build_notifier(config: &Config) -> NotifierDeps {
    let email: Option<Arc<dyn BaseEmailSender>> = match &config.resend_api_key {
        Some(api_key) => Some(Arc::new(ResendAdapter::new(
            Arc::new(ResendService::new(api_key.clone())),
            config.business.email_from.clone(),
            config.business.email_reply_to.clone(),
        ))),
        None => {
            tracing::warn!("RESEND_API_KEY not configured, email notifications will be skipped");
            None
        }
    };

    let sms: Option<Arc<dyn BaseSmsSender>> = match (
        &config.solapi_api_key,
        &config.solapi_api_secret,
        &config.solapi_from_number,
    ) {
        (Some(api_key), Some(api_secret), Some(from_number)) => {
            let service = SolapiService::new(SolapiOptions {
                api_key: api_key.clone(),
                api_secret: api_secret.clone(),
                from_number: from_number.clone(),
            });
            Some(Arc::new(SolapiAdapter::new(
                Arc::new(service),
                format!("[{}]", config.business.name),
            )))
        }
        _ => {
            tracing::warn!("Solapi credentials not configured, SMS notifications will be skipped");
            None
        }
    };

    NotifierDeps {
        email,
        sms,
        business: config.business.clone(),
    }
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let server_deps = Arc::new(ServerDeps::new(pool.clone(), build_notifier(config)));

    let app_state = AppState {
        db_pool: pool,
        deps: server_deps,
        admin_api_token: config.admin_api_token.clone(),
        cron_secret: config.cron_secret.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        // Public booking surface
        .route(
            "/api/bookings",
            post(create_booking_handler).get(list_bookings_handler),
        )
        .route(
            "/api/bookings/:id",
            get(get_booking_handler).patch(update_booking_handler),
        )
        .route("/api/availability", get(availability_handler))
        // Admin blocked-time management
        .route(
            "/api/admin/blocked-times",
            get(list_blocked_times_handler).post(create_blocked_time_handler),
        )
        .route(
            "/api/admin/blocked-times/:id",
            delete(delete_blocked_time_handler),
        )
        // Cron surface (shared-secret authorized)
        .route(
            "/api/cron/send-reminders",
            get(send_reminders_handler).post(send_reminders_handler),
        )
        .route(
            "/api/cron/auto-confirm",
            get(auto_confirm_handler).post(auto_confirm_handler),
        )
        // Health check
        .route("/health", get(health_handler))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
