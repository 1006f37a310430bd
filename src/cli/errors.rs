//! CLI-specific error types
//!
//! Every CLI failure ends the command with one coded error object.

use std::fmt;
use std::io;

use crate::preview::PreviewError;
use crate::schema::ValidationError;
use crate::store::StoreError;
use crate::transport::SubmitError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// Input file is not the expected JSON
    InvalidInput,
    /// Schema rejected by validation
    ValidationFailed,
    /// Preview could not be rendered or filled
    PreviewFailed,
    /// No schema stored yet
    NoSchema,
    /// Workspace file error
    WorkspaceError,
    /// Form name already taken on the server
    NameConflict,
    /// Session missing or rejected
    SessionInvalid,
    /// Login refused
    LoginFailed,
    /// Network failure or non-2xx response
    RequestFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FORMSMITH_CLI_CONFIG_ERROR",
            Self::IoError => "FORMSMITH_CLI_IO_ERROR",
            Self::InvalidInput => "FORMSMITH_CLI_INVALID_INPUT",
            Self::ValidationFailed => "FORMSMITH_CLI_VALIDATION_FAILED",
            Self::PreviewFailed => "FORMSMITH_CLI_PREVIEW_FAILED",
            Self::NoSchema => "FORMSMITH_CLI_NO_SCHEMA",
            Self::WorkspaceError => "FORMSMITH_CLI_WORKSPACE_ERROR",
            Self::NameConflict => "FORMSMITH_CLI_NAME_CONFLICT",
            Self::SessionInvalid => "FORMSMITH_CLI_SESSION_INVALID",
            Self::LoginFailed => "FORMSMITH_CLI_LOGIN_FAILED",
            Self::RequestFailed => "FORMSMITH_CLI_REQUEST_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Nothing generated yet
    pub fn no_schema() -> Self {
        Self::new(
            CliErrorCode::NoSchema,
            "No schema generated yet. Run 'formsmith generate' first.",
        )
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ValidationError> for CliError {
    fn from(e: ValidationError) -> Self {
        Self::new(CliErrorCode::ValidationFailed, e.message())
    }
}

impl From<PreviewError> for CliError {
    fn from(e: PreviewError) -> Self {
        match e {
            PreviewError::Invalid(inner) => inner.into(),
            other => Self::new(CliErrorCode::PreviewFailed, other.to_string()),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        Self::new(CliErrorCode::WorkspaceError, e.to_string())
    }
}

impl From<SubmitError> for CliError {
    fn from(e: SubmitError) -> Self {
        let code = match &e {
            SubmitError::Validation(_) => CliErrorCode::ValidationFailed,
            SubmitError::Conflict { .. } => CliErrorCode::NameConflict,
            SubmitError::Session(_) => CliErrorCode::SessionInvalid,
            SubmitError::Login(_) => CliErrorCode::LoginFailed,
            SubmitError::Http { .. } | SubmitError::Network(_) | SubmitError::InProgress => {
                CliErrorCode::RequestFailed
            }
        };
        Self::new(code, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
