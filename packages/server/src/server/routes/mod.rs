// HTTP routes
pub mod availability;
pub mod blocked_times;
pub mod bookings;
pub mod cron;
pub mod health;

pub use availability::*;
pub use blocked_times::*;
pub use bookings::*;
pub use cron::*;
pub use health::*;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;

use crate::domains::scheduling::SchedulingError;

/// Maps domain errors onto HTTP responses: client mistakes are 400,
/// stale/contended state is 409, missing rows are 404, and everything
/// database-shaped is a logged 500.
pub struct ApiError(pub SchedulingError);

impl From<SchedulingError> for ApiError {
    fn from(error: SchedulingError) -> Self {
        Self(error)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(error: sqlx::Error) -> Self {
        Self(SchedulingError::Database(error))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SchedulingError::InvalidName
            | SchedulingError::InvalidPhoneFormat
            | SchedulingError::InvalidEmail
            | SchedulingError::MissingOfficeForVisit
            | SchedulingError::MissingTimeRange
            | SchedulingError::InvalidTimeRange => StatusCode::BAD_REQUEST,
            SchedulingError::SlotNoLongerAvailable
            | SchedulingError::TerminalState(_)
            | SchedulingError::InvalidTransition { .. } => StatusCode::CONFLICT,
            SchedulingError::NotFound => StatusCode::NOT_FOUND,
            SchedulingError::Database(e) => {
                tracing::error!("Database error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
