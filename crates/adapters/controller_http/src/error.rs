//! Controller adapter error types.

use smarthouse_domain::error::SmartHouseError;

/// Errors raised while talking to the controller API or the webhook.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success HTTP status.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The API answered but reported a failure in its body.
    #[error("controller reported status `{0}`")]
    Rejected(String),
}

impl From<ControllerError> for SmartHouseError {
    fn from(err: ControllerError) -> Self {
        Self::ControllerUnreachable(Box::new(err))
    }
}
