//! Renders a stored schema into per-field input controls
//!
//! The control for each field follows its kind:
//! - text: free text input
//! - date: date input
//! - image: text input for the chosen image form (url/base64)
//! - select: single choice over the field options
//! - checkbox: one checkbox per option

use serde::Serialize;

use crate::schema::{validate, Field, FieldKind, Schema};

use super::errors::{PreviewError, PreviewResult};
use super::response::{FieldSubmission, FormResponse, FormSubmission, SectionSubmission};

/// Input control rendered for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    TextInput { placeholder: String },
    DateInput { placeholder: String },
    ImageInput { placeholder: String },
    Select { options: Vec<String> },
    CheckboxGroup { options: Vec<String> },
}

/// A rendered field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field_id: u32,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(flatten)]
    pub control: Control,
}

/// A rendered section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub title: String,
    pub required: bool,
    pub fields: Vec<FieldView>,
}

/// A live form rendered from a validated schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: String,
    pub description: Option<String>,
    pub sections: Vec<SectionView>,
    #[serde(skip)]
    schema: Schema,
}

impl FormView {
    /// Renders a schema. The schema is validated first.
    pub fn from_schema(schema: &Schema) -> PreviewResult<Self> {
        validate(schema)?;

        let sections = schema
            .template
            .iter()
            .map(|section| SectionView {
                title: section.section_name.clone(),
                required: section.required,
                fields: section.fields.iter().filter_map(render_field).collect(),
            })
            .collect();

        Ok(Self {
            title: schema.name.clone(),
            description: schema.description.clone(),
            sections,
            schema: schema.clone(),
        })
    }

    /// The schema this view was rendered from
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub(crate) fn field(&self, section: usize, name: &str) -> PreviewResult<&FieldView> {
        let view = self
            .sections
            .get(section)
            .ok_or(PreviewError::UnknownSection(section))?;
        view.fields
            .iter()
            .find(|field| field.label == name)
            .ok_or_else(|| PreviewError::UnknownField {
                section,
                field: name.to_string(),
            })
    }

    /// Formats the filled-in form for submission.
    ///
    /// Options are only included for select and checkbox fields.
    pub fn submission(&self, response: &FormResponse) -> FormSubmission {
        let template = self
            .schema
            .template
            .iter()
            .enumerate()
            .map(|(index, section)| SectionSubmission {
                section_name: section.section_name.clone(),
                fields: section
                    .fields
                    .iter()
                    .map(|field| {
                        let custom = field.kind().map_or(false, |k| k.has_custom_options());
                        FieldSubmission {
                            field_name: field.name.clone(),
                            field_type: field.field_type.clone(),
                            required: field.required,
                            options: custom.then(|| field.options.clone()),
                            value: response.value(index, &field.name).cloned(),
                        }
                    })
                    .collect(),
            })
            .collect();

        FormSubmission {
            form_name: self.schema.name.clone(),
            form_description: self.schema.description.clone(),
            account_id: self.schema.account_id,
            template,
        }
    }
}

fn render_field(field: &Field) -> Option<FieldView> {
    // Validation guarantees a known kind.
    let kind = field.kind()?;
    let lowered = field.name.to_lowercase();

    let control = match kind {
        FieldKind::Text => Control::TextInput {
            placeholder: format!("Enter {}", lowered),
        },
        FieldKind::Date => Control::DateInput {
            placeholder: format!("Select {}", lowered),
        },
        FieldKind::Image => Control::ImageInput {
            placeholder: match field.options.first() {
                Some(first) => format!("Enter {}", first),
                None => format!("Enter URL for {}", lowered),
            },
        },
        FieldKind::Select => Control::Select {
            options: field.options.clone(),
        },
        FieldKind::Checkbox => Control::CheckboxGroup {
            options: field.options.clone(),
        },
    };

    Some(FieldView {
        field_id: field.field_id,
        label: field.name.clone(),
        kind,
        required: field.required,
        control,
    })
}
