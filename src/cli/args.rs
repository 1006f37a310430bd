//! CLI argument definitions using clap
//!
//! Commands:
//! - formsmith types
//! - formsmith generate --input <builder.json>
//! - formsmith validate --input <schema.json>
//! - formsmith preview [--input <schema.json>] [--values <values.json>]
//! - formsmith send --input <builder.json>
//! - formsmith login --email <email> --password <password>
//! - formsmith logout
//!
//! Every command accepts a global `--config <path>`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// formsmith - build, validate and publish dynamic form schemas
#[derive(Parser, Debug)]
#[command(name = "formsmith")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List field types and reservation statuses
    Types,

    /// Normalize and validate builder state, and store the schema
    Generate {
        /// Builder state JSON file
        #[arg(long)]
        input: PathBuf,
    },

    /// Validate a schema file
    Validate {
        /// Schema JSON file
        #[arg(long)]
        input: PathBuf,
    },

    /// Render a schema as a form
    Preview {
        /// Schema JSON file (defaults to the last generated schema)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Entered values to fill in
        #[arg(long)]
        values: Option<PathBuf>,
    },

    /// Validate builder state and send it to the server
    Send {
        /// Builder state JSON file
        #[arg(long)]
        input: PathBuf,
    },

    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Remove the stored session
    Logout,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
