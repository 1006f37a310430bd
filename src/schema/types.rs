//! Form schema type definitions
//!
//! These types are the wire contract sent to the forms API:
//! - Schema: form name, description, owning account, ordered sections
//! - Section: named group of fields with a required flag and reservation status
//! - Field: a single input definition
//!
//! Field types travel as raw string tags. The closed set of known types is
//! `FieldKind`, resolved through the registry.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::registry;

/// Closed set of field kinds known to the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text input
    Text,
    /// Image reference (url or base64)
    Image,
    /// Date input
    Date,
    /// Single choice from custom options
    Select,
    /// Multiple choice from custom options
    Checkbox,
}

impl FieldKind {
    /// Returns the wire tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Image => "image",
            FieldKind::Date => "date",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
        }
    }

    /// Whether options come from the user's comma-separated input
    pub fn has_custom_options(&self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::Checkbox)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A single field inside a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Sequential id, unique across the whole schema
    pub field_id: u32,
    /// Display name
    pub name: String,
    /// Raw type tag, checked against the registry by the validator
    #[serde(rename = "type")]
    pub field_type: String,
    /// Effective option list
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether a value must be supplied
    pub required: bool,
    /// Reservation status label
    pub reservation_status_name: String,
    /// Reservation status id (integer 1-10 carried as a string)
    pub reservation_status_id: String,
}

impl Field {
    /// Resolves the type tag to a known kind
    pub fn kind(&self) -> Option<FieldKind> {
        registry::lookup(&self.field_type).map(|entry| entry.kind)
    }
}

/// A named, ordered group of fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_name: String,
    pub required: bool,
    pub reservation_status_name: String,
    pub reservation_status_id: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// Complete form definition submitted to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Form name (unique on the server side)
    pub name: String,
    /// Optional description, null when blank
    pub description: Option<String>,
    /// Owning account, 1-10
    pub account_id: i64,
    /// Ordered sections
    #[serde(default)]
    pub template: Vec<Section>,
}

impl Schema {
    /// Iterates every field in section-then-field order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.template.iter().flat_map(|section| section.fields.iter())
    }

    /// Total number of fields across all sections
    pub fn field_count(&self) -> usize {
        self.template.iter().map(|section| section.fields.len()).sum()
    }
}
