//! # Preview Errors

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for preview operations
pub type PreviewResult<T> = Result<T, PreviewError>;

/// Errors raised while rendering or filling in a preview
#[derive(Debug, Clone, Error)]
pub enum PreviewError {
    /// The stored schema does not validate
    #[error("{}", .0.message())]
    Invalid(#[from] ValidationError),

    /// No section at this position
    #[error("No section at position {0}")]
    UnknownSection(usize),

    /// No field with this name in the section
    #[error("No field named '{field}' in section {section}")]
    UnknownField { section: usize, field: String },

    /// Value does not fit the field's control
    #[error("Field '{field}' does not accept {value_kind} values")]
    WrongValueKind { field: String, value_kind: &'static str },

    /// Choice is not one of the field's options
    #[error("'{option}' is not an option of field '{field}'")]
    NotAnOption { field: String, option: String },
}
