//! # Submission Errors
//!
//! Every failure of a submit attempt falls in one of three groups:
//! - validation: the schema is rejected locally, no request is made
//! - transport: network failure or a non-2xx response; 409 is reported
//!   as a name conflict
//! - session: the credential is missing or rejected; callers must log out
//!
//! None of them touch the builder state, so the user can fix and resend.

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for transport operations
pub type SubmitResult<T> = Result<T, SubmitError>;

/// Credential problems that force a logout
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No token stored
    #[error("Not logged in")]
    MissingCredential,

    /// Server answered 401/403
    #[error("Session expired or invalid")]
    Rejected,
}

/// Submission and login errors
#[derive(Debug, Clone, Error)]
pub enum SubmitError {
    // ==================
    // Validation
    // ==================
    /// Schema rejected before any request
    #[error("{}", .0.message())]
    Validation(#[from] ValidationError),

    // ==================
    // Transport
    // ==================
    /// A form with this name already exists (409)
    #[error("A form named '{name}' already exists")]
    Conflict { name: String },

    /// Non-2xx response
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// Request never completed
    #[error("Network error: {0}")]
    Network(String),

    /// Login refused or returned no token
    #[error("{0}")]
    Login(String),

    // ==================
    // Session
    // ==================
    /// Credential missing or rejected
    #[error("{0}")]
    Session(#[from] SessionError),

    // ==================
    // Re-entry
    // ==================
    /// Another submission is still pending
    #[error("A submission is already in progress")]
    InProgress,
}

impl SubmitError {
    /// Stable code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::Validation(err) => err.code().code(),
            SubmitError::Conflict { .. } => "FORMSMITH_NAME_CONFLICT",
            SubmitError::Http { .. } => "FORMSMITH_HTTP_ERROR",
            SubmitError::Network(_) => "FORMSMITH_NETWORK_ERROR",
            SubmitError::Login(_) => "FORMSMITH_LOGIN_FAILED",
            SubmitError::Session(_) => "FORMSMITH_SESSION_INVALID",
            SubmitError::InProgress => "FORMSMITH_SUBMIT_IN_PROGRESS",
        }
    }

    /// HTTP status behind this error, if there was a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SubmitError::Conflict { .. } => Some(409),
            SubmitError::Http { status, .. } => Some(*status),
            SubmitError::Session(SessionError::Rejected) => Some(401),
            _ => None,
        }
    }

    /// Whether the caller must drop the stored session
    pub fn is_session(&self) -> bool {
        matches!(self, SubmitError::Session(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, SubmitError::Conflict { .. })
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Network(err.to_string())
    }
}
