//! Builder subsystem
//!
//! Holds the editable form-in-progress and the edit operations the builder
//! UI performs on it. The state is a plain owned value: callers pass it to
//! `schema::normalize` when the user generates or sends the schema.

mod errors;
mod state;

pub use errors::{BuilderError, BuilderResult};
pub use state::{BuilderState, RawField, RawSection};
