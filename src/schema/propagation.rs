//! Required-flag propagation between a section and its fields
//!
//! - Section set to required: every field becomes required
//! - Section set to optional: fields keep their own flags
//! - Any field toggle: section required = AND over all field flags
//!
//! The rule is a pure reducer applied on every required-flag edit. It has
//! no failure mode.

use crate::builder::{RawField, RawSection};

/// A single required-flag edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredEdit {
    /// Section checkbox toggled
    Section(bool),
    /// Field checkbox toggled
    Field { index: usize, required: bool },
}

/// Derives a section's required flag from its fields.
///
/// An empty field list yields `true`; callers only derive after a field
/// edit, so a section always has fields at that point.
pub fn derive_section_required(fields: &[RawField]) -> bool {
    fields.iter().all(|field| field.required)
}

/// Applies an edit and returns the resulting section.
///
/// A field index past the end leaves the section unchanged.
pub fn apply_required_edit(section: &RawSection, edit: RequiredEdit) -> RawSection {
    let mut next = section.clone();

    match edit {
        RequiredEdit::Section(true) => {
            next.required = true;
            for field in &mut next.fields {
                field.required = true;
            }
        }
        RequiredEdit::Section(false) => {
            next.required = false;
        }
        RequiredEdit::Field { index, required } => {
            let Some(field) = next.fields.get_mut(index) else {
                return next;
            };
            field.required = required;
            next.required = derive_section_required(&next.fields);
        }
    }

    next
}
