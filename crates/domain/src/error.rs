//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SmartHouseError`] via `From`. Collaborator failures (network, storage)
//! are carried as boxed sources so the domain never depends on adapter crates.

/// Top-level error shared by every layer.
#[derive(Debug, thiserror::Error)]
pub enum SmartHouseError {
    /// User-submitted values were rejected. Nothing was mutated.
    #[error("invalid user input")]
    InvalidUserInput(#[from] ValidationError),

    /// The rule engine could not evaluate the snapshot.
    #[error("rule evaluation failed")]
    Evaluation(#[from] EvaluationError),

    /// The controller API could not be reached or answered with a failure.
    #[error("no connection to controllers API")]
    ControllerUnreachable(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The settings store failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised by the rule engine. Always fatal for the whole pass.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("state snapshot has no value for `{key}`")]
    MissingStateKey { key: String },

    #[error("state value for `{key}` is not a {expected}")]
    UnexpectedStateValue { key: String, expected: &'static str },

    #[error("threshold `{name}` is not configured")]
    MissingThreshold { name: String },
}

/// Rejections of user-submitted control values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("`{name}` must be a finite number")]
    NotFinite { name: &'static str },

    #[error("`{name}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
