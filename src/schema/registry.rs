//! Static catalogs: field types and reservation statuses
//!
//! Both catalogs are process-wide, read-only lookup tables.

use super::types::FieldKind;

/// A field type catalog entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTypeEntry {
    /// Wire tag
    pub type_name: &'static str,
    /// Closed kind for this tag
    pub kind: FieldKind,
    /// Options offered when the type is chosen
    pub default_options: &'static [&'static str],
    /// Whether options come from user input instead of the catalog
    pub has_custom_options: bool,
}

impl FieldTypeEntry {
    /// Default options as owned strings
    pub fn default_option_list(&self) -> Vec<String> {
        self.default_options.iter().map(|o| o.to_string()).collect()
    }

    /// Whether `option` is one of the catalog defaults
    pub fn offers(&self, option: &str) -> bool {
        self.default_options.contains(&option)
    }
}

/// A reservation status catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationStatus {
    pub id: &'static str,
    pub name: &'static str,
}

/// Status name applied when none is given
pub const DEFAULT_STATUS_NAME: &str = "active";

const FIELD_TYPES: &[FieldTypeEntry] = &[
    FieldTypeEntry {
        type_name: "text",
        kind: FieldKind::Text,
        default_options: &["short", "long"],
        has_custom_options: false,
    },
    FieldTypeEntry {
        type_name: "image",
        kind: FieldKind::Image,
        default_options: &["url", "base64"],
        has_custom_options: false,
    },
    FieldTypeEntry {
        type_name: "date",
        kind: FieldKind::Date,
        default_options: &["past", "future"],
        has_custom_options: false,
    },
    FieldTypeEntry {
        type_name: "select",
        kind: FieldKind::Select,
        default_options: &[],
        has_custom_options: true,
    },
    FieldTypeEntry {
        type_name: "checkbox",
        kind: FieldKind::Checkbox,
        default_options: &[],
        has_custom_options: true,
    },
];

const RESERVATION_STATUSES: &[ReservationStatus] = &[
    ReservationStatus { id: "1", name: "active" },
    ReservationStatus { id: "2", name: "inactive" },
    ReservationStatus { id: "3", name: "pending" },
];

/// Looks up a field type by its wire tag
pub fn lookup(type_name: &str) -> Option<&'static FieldTypeEntry> {
    FIELD_TYPES.iter().find(|entry| entry.type_name == type_name)
}

/// Returns the catalog entry for a kind
pub fn entry_for(kind: FieldKind) -> &'static FieldTypeEntry {
    // Rows in FIELD_TYPES follow FieldKind declaration order.
    match kind {
        FieldKind::Text => &FIELD_TYPES[0],
        FieldKind::Image => &FIELD_TYPES[1],
        FieldKind::Date => &FIELD_TYPES[2],
        FieldKind::Select => &FIELD_TYPES[3],
        FieldKind::Checkbox => &FIELD_TYPES[4],
    }
}

/// All field types in catalog order
pub fn entries() -> &'static [FieldTypeEntry] {
    FIELD_TYPES
}

/// Looks up a reservation status by id
pub fn reservation_status(id: &str) -> Option<&'static ReservationStatus> {
    RESERVATION_STATUSES.iter().find(|status| status.id == id)
}

/// All reservation statuses in catalog order
pub fn reservation_statuses() -> &'static [ReservationStatus] {
    RESERVATION_STATUSES
}
