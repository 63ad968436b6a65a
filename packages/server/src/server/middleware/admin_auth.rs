//! Shared-token authentication for the admin surface.
//!
//! The admin panel calls these endpoints with
//! `Authorization: Bearer <ADMIN_API_TOKEN>`. Handlers opt in by taking an
//! [`AdminAuth`] argument; extraction rejects with 401 before the handler
//! body runs. The cron endpoints use their own secret, not this one.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use serde_json::{json, Value};

use crate::server::app::AppState;

pub struct AdminAuth;

fn unauthorized() -> (StatusCode, Json<Value>) {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": "Unauthorized" })))
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(state) = parts.extensions.get::<AppState>() else {
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Application state missing" })),
            ));
        };

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.strip_prefix("Bearer ").unwrap_or(value));

        match token {
            Some(token) if token == state.admin_api_token => Ok(AdminAuth),
            _ => Err(unauthorized()),
        }
    }
}
