//! Error types for DP-means fitting.

use thiserror::Error;

/// Errors that can occur while fitting a DP-means model.
#[derive(Debug, Error)]
pub enum DpMeansError {
    /// Malformed or out-of-range data arguments.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what's wrong with the data
        message: String,
    },

    /// Bad fit parameters (max_iter, tol).
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of what's wrong with the parameter
        message: String,
    },

    /// Internal invariant violation. Unreachable given the assignment
    /// engine's contract; seeing this means a defect in the fit loop.
    #[error("Inconsistent state: {message}")]
    InconsistentState {
        /// Description of the violated invariant
        message: String,
    },
}

impl DpMeansError {
    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an InconsistentState error.
    pub fn inconsistent_state(message: impl Into<String>) -> Self {
        Self::InconsistentState {
            message: message.into(),
        }
    }
}
