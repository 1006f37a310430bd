//! Values entered into a rendered form, and the submission built from them
//!
//! Values are keyed by section position and field name. Checkbox values
//! are kept in the order the boxes were checked.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::FieldKind;

use super::errors::{PreviewError, PreviewResult};
use super::view::{Control, FieldView, FormView};

/// A value entered for a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, date, image or select value
    Text(String),
    /// Checked checkbox options
    Choices(Vec<String>),
}

/// Entered values for one rendered form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormResponse {
    values: BTreeMap<(usize, String), FieldValue>,
}

impl FormResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value entered for a field
    pub fn value(&self, section: usize, field: &str) -> Option<&FieldValue> {
        self.values.get(&(section, field.to_string()))
    }

    /// Sets a text, date or image value
    pub fn set_text(
        &mut self,
        view: &FormView,
        section: usize,
        field: &str,
        value: impl Into<String>,
    ) -> PreviewResult<()> {
        let target = view.field(section, field)?;
        if !matches!(target.kind, FieldKind::Text | FieldKind::Date | FieldKind::Image) {
            return Err(PreviewError::WrongValueKind {
                field: field.to_string(),
                value_kind: "text",
            });
        }
        self.values
            .insert((section, field.to_string()), FieldValue::Text(value.into()));
        Ok(())
    }

    /// Picks the value of a select field
    pub fn select(
        &mut self,
        view: &FormView,
        section: usize,
        field: &str,
        option: &str,
    ) -> PreviewResult<()> {
        let target = view.field(section, field)?;
        if target.kind != FieldKind::Select {
            return Err(PreviewError::WrongValueKind {
                field: field.to_string(),
                value_kind: "select",
            });
        }
        ensure_option(target, option)?;
        self.values.insert(
            (section, field.to_string()),
            FieldValue::Text(option.to_string()),
        );
        Ok(())
    }

    /// Checks or unchecks one option of a checkbox field
    pub fn toggle_checkbox(
        &mut self,
        view: &FormView,
        section: usize,
        field: &str,
        option: &str,
        checked: bool,
    ) -> PreviewResult<()> {
        let target = view.field(section, field)?;
        if target.kind != FieldKind::Checkbox {
            return Err(PreviewError::WrongValueKind {
                field: field.to_string(),
                value_kind: "checkbox",
            });
        }
        ensure_option(target, option)?;

        let entry = self
            .values
            .entry((section, field.to_string()))
            .or_insert_with(|| FieldValue::Choices(Vec::new()));
        if let FieldValue::Text(_) = entry {
            *entry = FieldValue::Choices(Vec::new());
        }
        if let FieldValue::Choices(chosen) = entry {
            let present = chosen.iter().any(|c| c == option);
            if checked && !present {
                chosen.push(option.to_string());
            } else if !checked {
                chosen.retain(|c| c != option);
            }
        }
        Ok(())
    }

    /// Lists required text/date/image fields that are still empty, as
    /// `"{section} / {field}"`
    pub fn missing_required(&self, view: &FormView) -> Vec<String> {
        let mut missing = Vec::new();
        for (index, section) in view.sections.iter().enumerate() {
            for field in &section.fields {
                if !field.required
                    || !matches!(field.kind, FieldKind::Text | FieldKind::Date | FieldKind::Image)
                {
                    continue;
                }
                let filled = matches!(
                    self.value(index, &field.label),
                    Some(FieldValue::Text(text)) if !text.trim().is_empty()
                );
                if !filled {
                    missing.push(format!("{} / {}", section.title, field.label));
                }
            }
        }
        missing
    }
}

fn ensure_option(target: &FieldView, option: &str) -> PreviewResult<()> {
    let offered = match &target.control {
        Control::Select { options } | Control::CheckboxGroup { options } => {
            options.iter().any(|o| o == option)
        }
        _ => false,
    };
    if offered {
        Ok(())
    } else {
        Err(PreviewError::NotAnOption {
            field: target.label.clone(),
            option: option.to_string(),
        })
    }
}

/// A submitted field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSubmission {
    pub field_name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub value: Option<FieldValue>,
}

/// A submitted section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSubmission {
    pub section_name: String,
    pub fields: Vec<FieldSubmission>,
}

/// A filled-in form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSubmission {
    pub form_name: String,
    pub form_description: Option<String>,
    pub account_id: i64,
    pub template: Vec<SectionSubmission>,
}
