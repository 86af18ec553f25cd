//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`CatpointError`] at the port boundaries.

/// Top-level error crossing every port boundary.
#[derive(Debug, thiserror::Error)]
pub enum CatpointError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The repository failed to read or persist state.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The image classifier failed to analyse a frame.
    #[error("classifier error")]
    Classifier(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A value handed to the domain is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("unknown arming status `{0}`")]
    UnknownArmingStatus(String),

    #[error("unknown alarm status `{0}`")]
    UnknownAlarmStatus(String),

    #[error("unknown sensor type `{0}`")]
    UnknownSensorType(String),

    #[error("camera frame must not be empty")]
    EmptyFrame,
}

/// A lookup by identifier found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
