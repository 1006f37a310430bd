//! Transport subsystem
//!
//! The only asynchronous boundary of formsmith. `ApiClient` talks to the
//! login and create-form endpoints; `Submitter` wraps it with the
//! validate-then-send pipeline and the re-entry guard.
//!
//! No automatic retries. A failed attempt leaves the builder state as it
//! was, so the user can correct and resend.

mod client;
mod errors;
mod submitter;

pub use client::{ApiClient, CreatedForm};
pub use errors::{SessionError, SubmitError, SubmitResult};
pub use submitter::{Submission, Submitter};
