//! CLI module for formsmith
//!
//! Provides command-line interface for:
//! - types: list the field type and status catalogs
//! - generate / validate: run the schema pipeline on files
//! - preview: render the last generated schema
//! - send / login / logout: talk to the form API

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    generate, login, logout, preview, run, run_command, send, types, validate, Config,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_input, write_error, write_response};
