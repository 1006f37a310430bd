//! Observable events for formsmith
//!
//! Events are explicit and typed. Each one maps to a stable upper-case
//! name used as the `event` key of a log line.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,

    // Schema pipeline
    /// Builder state normalized into a schema
    SchemaNormalized,
    /// Schema passed validation
    SchemaValidated,
    /// Schema rejected by validation
    ValidationFailed,
    /// Generated schema stored for preview
    SchemaStored,

    // Submission
    /// Submission request issued
    SubmitStart,
    /// Server created the form
    SubmitComplete,
    /// Server reported a duplicate form name
    SubmitConflict,
    /// Submission failed (network or non-2xx)
    SubmitFailed,
    /// Submission refused while another is pending
    SubmitRejectedInProgress,

    // Session
    /// Login succeeded and token stored
    LoginComplete,
    /// Login failed
    LoginFailed,
    /// Session missing or rejected by the server
    SessionInvalid,
    /// Session cleared
    Logout,
}

impl Event {
    /// Returns the event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::SchemaNormalized => "SCHEMA_NORMALIZED",
            Event::SchemaValidated => "SCHEMA_VALIDATED",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::SchemaStored => "SCHEMA_STORED",
            Event::SubmitStart => "SUBMIT_START",
            Event::SubmitComplete => "SUBMIT_COMPLETE",
            Event::SubmitConflict => "SUBMIT_CONFLICT",
            Event::SubmitFailed => "SUBMIT_FAILED",
            Event::SubmitRejectedInProgress => "SUBMIT_REJECTED_IN_PROGRESS",
            Event::LoginComplete => "LOGIN_COMPLETE",
            Event::LoginFailed => "LOGIN_FAILED",
            Event::SessionInvalid => "SESSION_INVALID",
            Event::Logout => "LOGOUT",
        }
    }

    /// Whether the event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::ValidationFailed
                | Event::SubmitConflict
                | Event::SubmitFailed
                | Event::SubmitRejectedInProgress
                | Event::LoginFailed
                | Event::SessionInvalid
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
