//! Mapping from domain errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use launchbot_domain::{LaunchBotError, STATE_MISMATCH_MESSAGE};
use serde_json::json;

/// Handler error wrapper.
#[derive(Debug)]
pub struct ApiError(pub LaunchBotError);

impl From<LaunchBotError> for ApiError {
    fn from(err: LaunchBotError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            LaunchBotError::StateMismatch | LaunchBotError::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            LaunchBotError::NoCredentials | LaunchBotError::ProviderAuth(_) => {
                StatusCode::UNAUTHORIZED
            }
            LaunchBotError::PostFailed(_) | LaunchBotError::Provider(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, kind = self.0.label(), "request failed");
        } else {
            tracing::warn!(error = %self.0, kind = self.0.label(), "request rejected");
        }

        match self.0 {
            LaunchBotError::StateMismatch => (status, STATE_MISMATCH_MESSAGE).into_response(),
            err => (status, Json(json!({ "error": err.label(), "message": err.to_string() })))
                .into_response(),
        }
    }
}
