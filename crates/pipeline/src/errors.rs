//! Top-level error types for the auto-assign domain.
//!
//! [`AutoAssignError`] covers every condition that aborts an invocation.
//! Failures of the external review system are described by
//! [`ReviewSystemError`], which infrastructure adapters produce and which
//! converts into [`AutoAssignError::ReviewSystem`].
//!
//! A skipped invocation is **not** an error: it is reported as a
//! [`crate::SkipReason`] inside a successful [`crate::Outcome`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// Review-system errors
// ---------------------------------------------------------------------------

/// Errors raised by an implementation of the review-system port traits.
///
/// No variant is retried. The first failure aborts the invocation and any
/// mutation that was already applied stays applied.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReviewSystemError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("Request to the review system failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The review system answered with a non-success status.
    #[error("Review system returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Could not decode review system response: {message}")]
    Decode {
        /// Description of the decoding problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Invocation-level errors
// ---------------------------------------------------------------------------

/// Errors that abort an invocation.
#[derive(Debug, Error)]
pub enum AutoAssignError {
    /// An action input or a runner environment variable is invalid or missing.
    ///
    /// Produced before any request is made to the review system.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The triggering event could not be read or decoded.
    #[error("Event error: {message}")]
    EventError {
        /// Description of the event problem.
        message: String,
    },

    /// A call to the review system failed.
    #[error(transparent)]
    ReviewSystem(#[from] ReviewSystemError),
}

impl AutoAssignError {
    /// Shorthand for [`AutoAssignError::ConfigurationError`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// Shorthand for [`AutoAssignError::EventError`].
    pub fn event(message: impl Into<String>) -> Self {
        Self::EventError {
            message: message.into(),
        }
    }
}
