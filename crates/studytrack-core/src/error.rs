//! Engine error types.
//!
//! Every engine operation returns a structured result instead of panicking,
//! and each failure names the precondition that was violated so the UI layer
//! can tell "no subject set" apart from "no correctness selected".

use thiserror::Error;

/// Errors reported by the classification engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A supplied value was present but unusable (empty subject name,
    /// non-positive problem number, out-of-range group id).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A required form selection was absent.
    #[error("missing required input: {field}")]
    MissingInput { field: &'static str },

    /// The named subject has not been set up.
    #[error("unknown subject: {0}")]
    MissingSubject(String),

    /// An export or import found nothing to work with.
    #[error("no data to process")]
    NoData,
}

impl EngineError {
    /// Returns `true` if this error is caused by caller input rather than
    /// engine state corruption. All current variants are.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EngineError::InvalidInput(_)
                | EngineError::MissingInput { .. }
                | EngineError::MissingSubject(_)
                | EngineError::NoData
        )
    }
}
