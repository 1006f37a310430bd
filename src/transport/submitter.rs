//! Submission with a re-entry guard
//!
//! A submitter owns one `submitting` flag. While a request is pending any
//! further call returns `InProgress` without touching the network. The
//! flag is cleared on every exit path, including validation failure.

use std::sync::atomic::{AtomicBool, Ordering};

use uuid::Uuid;

use crate::builder::BuilderState;
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{self, Schema};

use super::client::{ApiClient, CreatedForm};
use super::errors::{SessionError, SubmitError, SubmitResult};

/// Outcome of a successful submission
#[derive(Debug, Clone)]
pub struct Submission {
    /// Id attached to this attempt's log lines
    pub attempt_id: Uuid,
    pub schema: Schema,
    pub created: CreatedForm,
}

pub struct Submitter {
    client: ApiClient,
    submitting: AtomicBool,
}

struct SubmittingGuard<'a>(&'a AtomicBool);

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Submitter {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Whether a submission is pending
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Normalizes, validates and sends the builder state.
    ///
    /// The request is only issued once validation passes. The state is
    /// never modified; on any error the caller may edit and retry.
    pub async fn submit(&self, state: &BuilderState, token: Option<&str>) -> SubmitResult<Submission> {
        if self
            .submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log_event_with_fields(Event::SubmitRejectedInProgress, &[]);
            return Err(SubmitError::InProgress);
        }
        let _guard = SubmittingGuard(&self.submitting);

        let schema = schema::prepare(state)?;

        let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
            log_event_with_fields(Event::SessionInvalid, &[("reason", "missing")]);
            return Err(SessionError::MissingCredential.into());
        };

        let attempt_id = Uuid::new_v4();
        let attempt = attempt_id.to_string();
        log_event_with_fields(
            Event::SubmitStart,
            &[("attempt", &attempt), ("name", &schema.name)],
        );

        match self.client.create_form(token, &schema).await {
            Ok(created) => {
                let id = created.id.clone().unwrap_or_default();
                log_event_with_fields(
                    Event::SubmitComplete,
                    &[("attempt", &attempt), ("form_id", &id)],
                );
                Ok(Submission {
                    attempt_id,
                    schema,
                    created,
                })
            }
            Err(err) => {
                let event = match &err {
                    SubmitError::Conflict { .. } => Event::SubmitConflict,
                    SubmitError::Session(_) => Event::SessionInvalid,
                    _ => Event::SubmitFailed,
                };
                let message = err.to_string();
                log_event_with_fields(event, &[("attempt", &attempt), ("error", &message)]);
                Err(err)
            }
        }
    }
}
