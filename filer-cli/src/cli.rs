use std::path::PathBuf;

use clap::{Parser, Subcommand};
use filer_core::TaxYear;

use crate::config::Overrides;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Guided income tax return filing for Pakistani taxpayers.
///
/// Wizard progress is saved after every command and picked up again by the
/// next one.
#[derive(Debug, Parser)]
#[command(name = "pakfiler", version)]
pub struct Cli {
    /// TOML config file (defaults to `pakfiler.toml` when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Store backend: `json`, `sqlite` or `memory`.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Backend connection string: a directory for `json`, a file or
    /// `sqlite:` URL for `sqlite`.
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Log level or EnvFilter directive; `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            backend: self.backend.clone(),
            connection_string: self.store.clone(),
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Calculate income tax for a tax year.
    Calc {
        #[arg(long, default_value = "2025")]
        year: TaxYear,

        /// Income amount; commas are allowed (`2,400,000`).
        #[arg(long)]
        income: String,

        /// Treat `--income` as a monthly figure and annualize it.
        #[arg(long)]
        monthly: bool,

        /// CSV file with custom slabs (`tax_year,upper_bound,base_tax,rate`).
        #[arg(long)]
        schedule: Option<PathBuf>,
    },

    /// Print the slab table for a tax year.
    Schedule {
        #[arg(long, default_value = "2025")]
        year: TaxYear,
    },

    /// Show the current sub-step, its fields and overall progress.
    Status,

    /// Show the progress summary.
    Summary {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Set fields on the current sub-step, e.g. `set fullName="Ali Khan"`.
    Set {
        #[arg(required = true, value_name = "FIELD=VALUE")]
        assignments: Vec<String>,
    },

    /// Mark the current sub-step as completed.
    Complete,

    /// Move to the next sub-step.
    Next,

    /// Move to the previous sub-step.
    Prev,

    /// Jump to a step (and sub-step), both numbered from 1.
    Goto {
        step: usize,
        #[arg(default_value_t = 1)]
        sub_step: usize,
    },

    /// Submit the filing.
    Submit,

    /// Discard all progress and start over.
    Reset,
}
