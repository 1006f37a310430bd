//! Structural validation of a normalized schema
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. Form name is not blank
//! 2. account_id is within 1-10
//! 3. At least one section
//! 4. Per section: name, reservation status id, at least one field
//! 5. Per field: name, reservation status id, known type, options for
//!    select/checkbox
//!
//! The validator never mutates the schema. Section/field required
//! consistency is not checked here; it is maintained by the propagation
//! rule before a schema is ever built.

use super::errors::{ValidationError, ValidationResult};
use super::registry;
use super::types::{Field, Schema, Section};

/// Inclusive bounds for account and reservation status ids
pub const ID_MIN: i64 = 1;
pub const ID_MAX: i64 = 10;

/// Validates a schema, returning the first violation.
pub fn validate(schema: &Schema) -> ValidationResult<()> {
    if schema.name.trim().is_empty() {
        return Err(ValidationError::form_name_required());
    }

    if !id_in_range(schema.account_id) {
        return Err(ValidationError::account_id_out_of_range());
    }

    if schema.template.is_empty() {
        return Err(ValidationError::sections_required());
    }

    for (index, section) in schema.template.iter().enumerate() {
        validate_section(index, section)?;
    }

    Ok(())
}

fn validate_section(index: usize, section: &Section) -> ValidationResult<()> {
    if section.section_name.trim().is_empty() {
        return Err(ValidationError::section_name_required(index + 1));
    }

    if !status_id_in_range(&section.reservation_status_id) {
        return Err(ValidationError::section_status_out_of_range(
            &section.section_name,
        ));
    }

    if section.fields.is_empty() {
        return Err(ValidationError::section_fields_required(
            &section.section_name,
        ));
    }

    for field in &section.fields {
        validate_field(&section.section_name, field)?;
    }

    Ok(())
}

fn validate_field(section_name: &str, field: &Field) -> ValidationResult<()> {
    if field.name.trim().is_empty() {
        return Err(ValidationError::field_name_required(section_name));
    }

    if !status_id_in_range(&field.reservation_status_id) {
        return Err(ValidationError::field_status_out_of_range(
            section_name,
            &field.name,
        ));
    }

    let entry = registry::lookup(&field.field_type)
        .ok_or_else(|| ValidationError::field_type_unknown(section_name, &field.name))?;

    if entry.has_custom_options && field.options.is_empty() {
        return Err(ValidationError::field_options_required(
            section_name,
            &field.name,
            entry.type_name,
        ));
    }

    Ok(())
}

fn id_in_range(id: i64) -> bool {
    (ID_MIN..=ID_MAX).contains(&id)
}

/// Parses a string status id and checks its bounds.
pub fn status_id_in_range(raw: &str) -> bool {
    raw.trim().parse::<i64>().map_or(false, id_in_range)
}
