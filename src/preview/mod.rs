//! Preview subsystem
//!
//! Renders a stored schema as a live form, collects entered values and
//! formats the filled-in submission. The preview consumes the schema
//! read-only; `FormView::schema` hands it back unchanged so it can be
//! reopened in the builder.

mod errors;
mod response;
mod view;

pub use errors::{PreviewError, PreviewResult};
pub use response::{FieldSubmission, FieldValue, FormResponse, FormSubmission, SectionSubmission};
pub use view::{Control, FieldView, FormView, SectionView};
