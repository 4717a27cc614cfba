//! Error types for advisor operations.

use crate::transport::TransportError;
use crate::validation::FieldErrors;

/// Classified failure of an advisor call.
///
/// None of these are shown to the farmer directly; see
/// [`crate::presentation`] for the text each one maps to.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("model returned an empty response")]
    EmptyResponse,
    #[error("could not decode model output: {0}")]
    Decode(String),
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::Decode(err.to_string())
    }
}

impl From<FieldErrors> for AdvisorError {
    fn from(errors: FieldErrors) -> Self {
        AdvisorError::Validation(errors)
    }
}
