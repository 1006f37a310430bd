//! Observability subsystem for formsmith
//!
//! Typed lifecycle events written as JSON lines to stderr. Failure events
//! go out at WARN, the rest at INFO; `Logger::set_min_severity` filters
//! below that. Writing a log line never fails the caller.
//!
//! # Usage
//!
//! ```ignore
//! use formsmith::observability::{log_event_with_fields, Event, Logger};
//!
//! log_event_with_fields(Event::SubmitStart, &[("name", "Booking")]);
//! Logger::warn("VALIDATION_FAILED", &[("code", "FORM_NAME_REQUIRED")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Failure events are logged at WARN, everything else at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_failure() {
        Severity::Warn
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_event() {
        log_event(Event::ConfigLoaded);
        log_event(Event::Logout);
    }

    #[test]
    fn test_log_event_with_fields() {
        log_event_with_fields(Event::SubmitConflict, &[("name", "F1")]);
    }
}
