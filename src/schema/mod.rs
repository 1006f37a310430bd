//! Form schema subsystem
//!
//! Builder state is turned into a schema in two passes:
//!
//! - `normalize`: ids, options, trimming, coercion (never fails)
//! - `validate`: structural rules, fail-fast, read-only
//!
//! `prepare` runs both, which is what every submit path uses.

mod errors;
mod normalizer;
pub mod propagation;
pub mod registry;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationErrorCode, ValidationResult};
pub use normalizer::{coerce_account_id, normalize, split_custom_options};
pub use propagation::{apply_required_edit, derive_section_required, RequiredEdit};
pub use registry::{FieldTypeEntry, ReservationStatus};
pub use types::{Field, FieldKind, Schema, Section};
pub use validator::{status_id_in_range, validate};

use crate::builder::BuilderState;
use crate::observability::{log_event_with_fields, Event, Logger};

/// Normalizes and validates builder state.
pub fn prepare(state: &BuilderState) -> ValidationResult<Schema> {
    let schema = normalize(state);
    let fields = schema.field_count().to_string();
    let revision = state.revision.to_string();
    log_event_with_fields(
        Event::SchemaNormalized,
        &[("fields", &fields), ("revision", &revision)],
    );

    if let Err(err) = validate(&schema) {
        Logger::warn(
            Event::ValidationFailed.as_str(),
            &[("code", err.code().code()), ("message", err.message())],
        );
        return Err(err);
    }

    log_event_with_fields(Event::SchemaValidated, &[("name", &schema.name)]);
    Ok(schema)
}
