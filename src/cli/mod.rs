pub mod check;
pub mod config;
pub mod demo;
#[cfg(feature = "tui")]
pub mod form;

use clap::{Parser, Subcommand};

use crate::error::{Result, UtlaggError};
use crate::models::RequiredField;

/// Parse a `--require` list like "account,description". "none" clears the
/// set so only the total gates submission.
pub(crate) fn parse_required_list(list: &str) -> Result<Vec<RequiredField>> {
    if list == "none" {
        return Ok(vec![]);
    }
    list.split(',')
        .map(|name| match name.trim() {
            "account" => Ok(RequiredField::Account),
            "description" => Ok(RequiredField::Description),
            other => Err(UtlaggError::Settings(format!(
                "unknown required field: {other} (expected account, description, or none)"
            ))),
        })
        .collect()
}

#[derive(Parser)]
#[command(name = "utlagg", about = "Expense report form validation and submission gating.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a serialized form payload and show the resulting snapshot.
    Check {
        /// Path to a JSON object mapping field names to values
        file: String,
        /// Override the required-field policy: e.g. "account" or "none"
        #[arg(long)]
        require: Option<String>,
        /// Exit with an error when the form is not submittable
        #[arg(long)]
        strict: bool,
    },
    /// Fill an expense form interactively; submit prints the payload.
    #[cfg(feature = "tui")]
    Form {
        /// Number of line-item rows to render
        #[arg(long, default_value = "5")]
        rows: usize,
        /// Override the required-field policy: e.g. "account" or "none"
        #[arg(long)]
        require: Option<String>,
    },
    /// Write a sample form payload and validate it.
    Demo,
    /// Inspect or change the required-field policy.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current settings.
    Show,
    /// Set which fields a positive-amount row must fill in.
    Require {
        /// Comma-separated list: "account,description", "account", or "none"
        fields: String,
    },
}
