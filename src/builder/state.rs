//! Raw builder state and edit operations
//!
//! The builder state is the editable form-in-progress. It is owned by a
//! single editing session and passed explicitly to the normalizer. Every
//! successful edit bumps `revision`; failed edits change nothing.

use serde::{Deserialize, Deserializer, Serialize};

use crate::schema::propagation::{apply_required_edit, derive_section_required, RequiredEdit};
use crate::schema::registry;
use crate::schema::Schema;

use super::errors::{BuilderError, BuilderResult};

/// Status id given to new sections and fields
const DEFAULT_STATUS_ID: &str = "1";

/// A field as edited in the builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    /// Raw type tag as selected
    #[serde(rename = "type")]
    pub field_type: String,
    /// Options held for catalog types
    #[serde(default)]
    pub options: Vec<String>,
    /// Comma-separated options for select/checkbox
    #[serde(default)]
    pub custom_options: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub reservation_status_name: Option<String>,
    #[serde(default = "default_status_id")]
    pub reservation_status_id: String,
}

impl RawField {
    /// A text field with catalog defaults
    pub fn named(name: impl Into<String>) -> Self {
        let text = registry::entry_for(crate::schema::FieldKind::Text);
        Self {
            name: name.into(),
            field_type: text.type_name.to_string(),
            options: text.default_option_list(),
            custom_options: String::new(),
            required: false,
            reservation_status_name: Some(registry::DEFAULT_STATUS_NAME.to_string()),
            reservation_status_id: DEFAULT_STATUS_ID.to_string(),
        }
    }
}

/// A section as edited in the builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSection {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub reservation_status_name: Option<String>,
    #[serde(default = "default_status_id")]
    pub reservation_status_id: String,
    #[serde(default)]
    pub fields: Vec<RawField>,
}

impl RawSection {
    /// An empty, optional, active section
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            reservation_status_name: Some(registry::DEFAULT_STATUS_NAME.to_string()),
            reservation_status_id: DEFAULT_STATUS_ID.to_string(),
            fields: Vec::new(),
        }
    }
}

/// The whole form-in-progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderState {
    /// Incremented on every successful edit
    #[serde(default)]
    pub revision: u64,
    #[serde(default)]
    pub form_name: String,
    #[serde(default)]
    pub form_description: String,
    /// Account id as typed; coerced by the normalizer
    #[serde(default = "default_account_id", deserialize_with = "string_or_number")]
    pub account_id: String,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

fn default_status_id() -> String {
    DEFAULT_STATUS_ID.to_string()
}

fn default_account_id() -> String {
    "1".to_string()
}

/// Accepts `"2"` or `2` for the account id.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "account_id must be a string or number, got {}",
            other
        ))),
    }
}

impl Default for BuilderState {
    fn default() -> Self {
        Self {
            revision: 0,
            form_name: String::new(),
            form_description: String::new(),
            account_id: default_account_id(),
            sections: Vec::new(),
        }
    }
}

impl BuilderState {
    /// Creates an empty builder state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reopens a stored schema for editing.
    ///
    /// Custom options are re-joined with `", "` so that normalizing the
    /// result reproduces the schema. An option that itself contains a comma
    /// comes back split; builder input can never produce such an option.
    pub fn from_schema(schema: &Schema) -> Self {
        let sections = schema
            .template
            .iter()
            .map(|section| RawSection {
                name: section.section_name.clone(),
                required: section.required,
                reservation_status_name: Some(section.reservation_status_name.clone()),
                reservation_status_id: section.reservation_status_id.clone(),
                fields: section
                    .fields
                    .iter()
                    .map(|field| {
                        let custom = registry::lookup(&field.field_type)
                            .map_or(false, |entry| entry.has_custom_options);
                        RawField {
                            name: field.name.clone(),
                            field_type: field.field_type.clone(),
                            options: if custom { Vec::new() } else { field.options.clone() },
                            custom_options: if custom {
                                field.options.join(", ")
                            } else {
                                String::new()
                            },
                            required: field.required,
                            reservation_status_name: Some(field.reservation_status_name.clone()),
                            reservation_status_id: field.reservation_status_id.clone(),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            revision: 0,
            form_name: schema.name.clone(),
            form_description: schema.description.clone().unwrap_or_default(),
            account_id: schema.account_id.to_string(),
            sections,
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn section_mut(&mut self, section: usize) -> BuilderResult<&mut RawSection> {
        self.sections
            .get_mut(section)
            .ok_or(BuilderError::SectionNotFound(section))
    }

    fn field_mut(&mut self, section: usize, field: usize) -> BuilderResult<&mut RawField> {
        self.section_mut(section)?
            .fields
            .get_mut(field)
            .ok_or(BuilderError::FieldNotFound { section, field })
    }

    pub fn set_form_name(&mut self, name: impl Into<String>) {
        self.form_name = name.into();
        self.touch();
    }

    pub fn set_form_description(&mut self, description: impl Into<String>) {
        self.form_description = description.into();
        self.touch();
    }

    pub fn set_account_id(&mut self, account_id: impl Into<String>) {
        self.account_id = account_id.into();
        self.touch();
    }

    /// Appends `Section {n}` and returns its index
    pub fn add_section(&mut self) -> usize {
        let index = self.sections.len();
        self.sections
            .push(RawSection::named(format!("Section {}", index + 1)));
        self.touch();
        index
    }

    pub fn remove_section(&mut self, section: usize) -> BuilderResult<RawSection> {
        if section >= self.sections.len() {
            return Err(BuilderError::SectionNotFound(section));
        }
        let removed = self.sections.remove(section);
        self.touch();
        Ok(removed)
    }

    pub fn rename_section(&mut self, section: usize, name: impl Into<String>) -> BuilderResult<()> {
        self.section_mut(section)?.name = name.into();
        self.touch();
        Ok(())
    }

    /// Sets the section status; the name follows the catalog
    pub fn set_section_status(&mut self, section: usize, status_id: &str) -> BuilderResult<()> {
        let status = registry::reservation_status(status_id)
            .ok_or_else(|| BuilderError::UnknownReservationStatus(status_id.to_string()))?;
        let target = self.section_mut(section)?;
        target.reservation_status_id = status.id.to_string();
        target.reservation_status_name = Some(status.name.to_string());
        self.touch();
        Ok(())
    }

    pub fn set_section_required(&mut self, section: usize, required: bool) -> BuilderResult<()> {
        let target = self.section_mut(section)?;
        *target = apply_required_edit(target, RequiredEdit::Section(required));
        self.touch();
        Ok(())
    }

    /// Appends `Field {n}` to a section and returns its index.
    ///
    /// A field added to a required section starts out required.
    pub fn add_field(&mut self, section: usize) -> BuilderResult<usize> {
        let target = self.section_mut(section)?;
        let index = target.fields.len();
        let mut field = RawField::named(format!("Field {}", index + 1));
        field.required = target.required;
        target.fields.push(field);
        self.touch();
        Ok(index)
    }

    /// Removes a field and re-derives the section flag from the rest
    pub fn remove_field(&mut self, section: usize, field: usize) -> BuilderResult<RawField> {
        let target = self.section_mut(section)?;
        if field >= target.fields.len() {
            return Err(BuilderError::FieldNotFound { section, field });
        }
        let removed = target.fields.remove(field);
        if !target.fields.is_empty() {
            target.required = derive_section_required(&target.fields);
        }
        self.touch();
        Ok(removed)
    }

    pub fn rename_field(
        &mut self,
        section: usize,
        field: usize,
        name: impl Into<String>,
    ) -> BuilderResult<()> {
        self.field_mut(section, field)?.name = name.into();
        self.touch();
        Ok(())
    }

    /// Changes the type, resetting options to the catalog defaults
    pub fn set_field_type(&mut self, section: usize, field: usize, field_type: &str) -> BuilderResult<()> {
        let entry = registry::lookup(field_type)
            .ok_or_else(|| BuilderError::UnknownFieldType(field_type.to_string()))?;
        let target = self.field_mut(section, field)?;
        target.field_type = entry.type_name.to_string();
        target.options = entry.default_option_list();
        target.custom_options.clear();
        self.touch();
        Ok(())
    }

    pub fn set_custom_options(
        &mut self,
        section: usize,
        field: usize,
        custom_options: impl Into<String>,
    ) -> BuilderResult<()> {
        self.field_mut(section, field)?.custom_options = custom_options.into();
        self.touch();
        Ok(())
    }

    /// Records the single catalog option the user picked
    pub fn choose_option(&mut self, section: usize, field: usize, option: &str) -> BuilderResult<()> {
        let target = self.field_mut(section, field)?;
        let entry = registry::lookup(&target.field_type)
            .ok_or_else(|| BuilderError::UnknownFieldType(target.field_type.clone()))?;
        if entry.has_custom_options {
            return Err(BuilderError::CustomOptionsOnly(entry.type_name.to_string()));
        }
        if !entry.offers(option) {
            return Err(BuilderError::OptionNotOffered {
                field_type: entry.type_name.to_string(),
                option: option.to_string(),
            });
        }
        target.options = vec![option.to_string()];
        self.touch();
        Ok(())
    }

    pub fn set_field_status(&mut self, section: usize, field: usize, status_id: &str) -> BuilderResult<()> {
        let status = registry::reservation_status(status_id)
            .ok_or_else(|| BuilderError::UnknownReservationStatus(status_id.to_string()))?;
        let target = self.field_mut(section, field)?;
        target.reservation_status_id = status.id.to_string();
        target.reservation_status_name = Some(status.name.to_string());
        self.touch();
        Ok(())
    }

    /// Toggles a field and re-derives the section flag
    pub fn set_field_required(&mut self, section: usize, field: usize, required: bool) -> BuilderResult<()> {
        let target = self.section_mut(section)?;
        if field >= target.fields.len() {
            return Err(BuilderError::FieldNotFound { section, field });
        }
        *target = apply_required_edit(target, RequiredEdit::Field { index: field, required });
        self.touch();
        Ok(())
    }
}
