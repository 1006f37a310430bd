//! Workspace store
//!
//! File-backed persistence for the login session and the last generated
//! schema, so the preview can be opened after the builder has exited.
//!
//! Layout under the workspace directory:
//! - `session.json`: bearer token and login time
//! - `current_schema.json`: last generated schema and its server id

mod errors;
mod workspace;

pub use errors::{StoreError, StoreResult};
pub use workspace::{Session, StoredSchema, Workspace};
