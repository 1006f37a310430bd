//! Builds the wire schema from raw builder state
//!
//! - Form name and description are trimmed; a blank description is null
//! - The account id is coerced to an integer (0 when it does not parse)
//! - field_id is a global counter from 1, section-then-field order
//! - select/checkbox options come from the comma-separated custom input
//! - other types keep the options held on the field
//! - a missing reservation status name defaults to "active"
//! - every field of a required section is required
//!
//! Normalization never fails and never mutates its input. Anything it
//! cannot fix is left for the validator to reject.

use crate::builder::{BuilderState, RawField, RawSection};

use super::registry::{self, DEFAULT_STATUS_NAME};
use super::types::{Field, Schema, Section};

/// Normalizes builder state into a schema.
pub fn normalize(state: &BuilderState) -> Schema {
    let mut next_id: u32 = 1;

    let template = state
        .sections
        .iter()
        .map(|section| normalize_section(section, &mut next_id))
        .collect();

    let description = state.form_description.trim();

    Schema {
        name: state.form_name.trim().to_string(),
        description: if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        },
        account_id: coerce_account_id(&state.account_id),
        template,
    }
}

fn normalize_section(section: &RawSection, next_id: &mut u32) -> Section {
    let fields = section
        .fields
        .iter()
        .map(|field| {
            let id = *next_id;
            *next_id += 1;
            normalize_field(field, id, section.required)
        })
        .collect();

    Section {
        section_name: section.name.trim().to_string(),
        required: section.required,
        reservation_status_name: status_name(&section.reservation_status_name),
        reservation_status_id: section.reservation_status_id.clone(),
        fields,
    }
}

fn normalize_field(field: &RawField, field_id: u32, section_required: bool) -> Field {
    let custom = registry::lookup(&field.field_type).map_or(false, |entry| entry.has_custom_options);

    let options = if custom {
        split_custom_options(&field.custom_options)
    } else {
        field.options.clone()
    };

    Field {
        field_id,
        name: field.name.trim().to_string(),
        field_type: field.field_type.clone(),
        options,
        required: field.required || section_required,
        reservation_status_name: status_name(&field.reservation_status_name),
        reservation_status_id: field.reservation_status_id.clone(),
    }
}

fn status_name(name: &Option<String>) -> String {
    name.clone()
        .unwrap_or_else(|| DEFAULT_STATUS_NAME.to_string())
}

/// Splits comma-separated options, trimming entries and dropping empties.
///
/// Order and duplicates are preserved.
pub fn split_custom_options(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses the typed account id; anything unparseable becomes 0.
pub fn coerce_account_id(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}
