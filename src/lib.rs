//! formsmith - build, validate and publish dynamic form schemas
//!
//! Builder state goes through `schema::prepare` (normalize, then validate)
//! before it is previewed or sent to the form API.

pub mod builder;
pub mod cli;
pub mod observability;
pub mod preview;
pub mod schema;
pub mod store;
pub mod transport;
