//! Schema validation error types
//!
//! Error codes:
//! - FORM_NAME_REQUIRED
//! - FORM_ACCOUNT_ID_OUT_OF_RANGE
//! - FORM_SECTIONS_REQUIRED
//! - FORM_SECTION_NAME_REQUIRED
//! - FORM_SECTION_STATUS_OUT_OF_RANGE
//! - FORM_SECTION_FIELDS_REQUIRED
//! - FORM_FIELD_NAME_REQUIRED
//! - FORM_FIELD_STATUS_OUT_OF_RANGE
//! - FORM_FIELD_TYPE_UNKNOWN
//! - FORM_FIELD_OPTIONS_REQUIRED
//!
//! Every validation error is recoverable: the message is shown to the user,
//! the submission is aborted and the builder state is kept.

use std::fmt;

/// Validation error codes, one per structural rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorCode {
    /// Form name is blank
    FormNameRequired,
    /// account_id outside 1-10
    AccountIdOutOfRange,
    /// Template has no sections
    SectionsRequired,
    /// Section name is blank
    SectionNameRequired,
    /// Section reservation status id is not an integer in 1-10
    SectionStatusOutOfRange,
    /// Section has no fields
    SectionFieldsRequired,
    /// Field name is blank
    FieldNameRequired,
    /// Field reservation status id is not an integer in 1-10
    FieldStatusOutOfRange,
    /// Field type tag is not in the registry
    FieldTypeUnknown,
    /// select/checkbox field has no options
    FieldOptionsRequired,
}

impl ValidationErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            Self::FormNameRequired => "FORM_NAME_REQUIRED",
            Self::AccountIdOutOfRange => "FORM_ACCOUNT_ID_OUT_OF_RANGE",
            Self::SectionsRequired => "FORM_SECTIONS_REQUIRED",
            Self::SectionNameRequired => "FORM_SECTION_NAME_REQUIRED",
            Self::SectionStatusOutOfRange => "FORM_SECTION_STATUS_OUT_OF_RANGE",
            Self::SectionFieldsRequired => "FORM_SECTION_FIELDS_REQUIRED",
            Self::FieldNameRequired => "FORM_FIELD_NAME_REQUIRED",
            Self::FieldStatusOutOfRange => "FORM_FIELD_STATUS_OUT_OF_RANGE",
            Self::FieldTypeUnknown => "FORM_FIELD_TYPE_UNKNOWN",
            Self::FieldOptionsRequired => "FORM_FIELD_OPTIONS_REQUIRED",
        }
    }
}

impl fmt::Display for ValidationErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Validation error with the offending location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    code: ValidationErrorCode,
    message: String,
    section: Option<String>,
    field: Option<String>,
}

impl ValidationError {
    fn new(code: ValidationErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            section: None,
            field: None,
        }
    }

    fn in_section(mut self, section: &str) -> Self {
        self.section = Some(section.to_string());
        self
    }

    fn on_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    pub fn form_name_required() -> Self {
        Self::new(ValidationErrorCode::FormNameRequired, "Form name is required")
    }

    pub fn account_id_out_of_range() -> Self {
        Self::new(
            ValidationErrorCode::AccountIdOutOfRange,
            "Account ID must be between 1 and 10",
        )
    }

    pub fn sections_required() -> Self {
        Self::new(
            ValidationErrorCode::SectionsRequired,
            "At least one section is required",
        )
    }

    /// `position` is 1-based
    pub fn section_name_required(position: usize) -> Self {
        Self::new(
            ValidationErrorCode::SectionNameRequired,
            format!("Section {} name is required", position),
        )
    }

    pub fn section_status_out_of_range(section: &str) -> Self {
        Self::new(
            ValidationErrorCode::SectionStatusOutOfRange,
            format!(
                "Section {} reservation status ID must be between 1 and 10",
                section
            ),
        )
        .in_section(section)
    }

    pub fn section_fields_required(section: &str) -> Self {
        Self::new(
            ValidationErrorCode::SectionFieldsRequired,
            format!("Section {} must have at least one field", section),
        )
        .in_section(section)
    }

    pub fn field_name_required(section: &str) -> Self {
        Self::new(
            ValidationErrorCode::FieldNameRequired,
            format!("Field name is required in section {}", section),
        )
        .in_section(section)
    }

    pub fn field_status_out_of_range(section: &str, field: &str) -> Self {
        Self::new(
            ValidationErrorCode::FieldStatusOutOfRange,
            format!(
                "Field {} reservation status ID must be between 1 and 10",
                field
            ),
        )
        .in_section(section)
        .on_field(field)
    }

    pub fn field_type_unknown(section: &str, field: &str) -> Self {
        Self::new(
            ValidationErrorCode::FieldTypeUnknown,
            format!("Invalid field type for {}", field),
        )
        .in_section(section)
        .on_field(field)
    }

    pub fn field_options_required(section: &str, field: &str, field_type: &str) -> Self {
        Self::new(
            ValidationErrorCode::FieldOptionsRequired,
            format!("Options are required for {} field \"{}\"", field_type, field),
        )
        .in_section(section)
        .on_field(field)
    }

    /// Returns the error code
    pub fn code(&self) -> ValidationErrorCode {
        self.code
    }

    /// Returns the user-facing message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the offending section name, if any
    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }

    /// Returns the offending field name, if any
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
