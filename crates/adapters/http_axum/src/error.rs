//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smarthouse_domain::error::SmartHouseError;

const NO_CONNECTION: &str = "No connection to controllers API";

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SmartHouseError`] to an HTTP response with appropriate status code.
pub struct ApiError(SmartHouseError);

impl From<SmartHouseError> for ApiError {
    fn from(err: SmartHouseError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SmartHouseError::InvalidUserInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SmartHouseError::ControllerUnreachable(err) => {
                tracing::warn!(error = %err, "controller unreachable");
                (StatusCode::BAD_GATEWAY, NO_CONNECTION.to_string())
            }
            // an incomplete snapshot means the controller answered garbage
            SmartHouseError::Evaluation(err) => {
                tracing::warn!(error = %err, "rule evaluation failed");
                (StatusCode::BAD_GATEWAY, NO_CONNECTION.to_string())
            }
            SmartHouseError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
