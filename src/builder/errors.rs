//! # Builder Errors
//!
//! Errors raised by builder edit operations. A failed edit leaves the
//! builder state and its revision untouched.

use thiserror::Error;

/// Result type for builder edits
pub type BuilderResult<T> = Result<T, BuilderError>;

/// Builder edit errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    /// Section index out of range
    #[error("No section at position {0}")]
    SectionNotFound(usize),

    /// Field index out of range within a section
    #[error("No field at position {field} in section {section}")]
    FieldNotFound { section: usize, field: usize },

    /// Field type tag is not in the registry
    #[error("Unknown field type: {0}")]
    UnknownFieldType(String),

    /// Reservation status id is not in the catalog
    #[error("Unknown reservation status: {0}")]
    UnknownReservationStatus(String),

    /// Option chosen for a type that is not in its catalog list
    #[error("Option '{option}' is not offered by field type {field_type}")]
    OptionNotOffered { field_type: String, option: String },

    /// Option chosen for a type whose options are free text
    #[error("Field type {0} takes custom options")]
    CustomOptionsOnly(String),
}
