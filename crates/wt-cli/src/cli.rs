//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::CalendarChoice;

/// Work-session tracker.
///
/// Records timer lifecycle events to a local log and reconstructs them
/// into per-day work reports under the Solar Hijri calendar.
#[derive(Debug, Parser)]
#[command(name = "wt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start a new work session.
    Start {
        /// Activity name for the session.
        label: String,
    },

    /// Pause the running session.
    Pause {
        /// Optional note attached to the pause.
        label: Option<String>,
    },

    /// Resume the paused session.
    Resume {
        /// Optional note attached to the resume.
        label: Option<String>,
    },

    /// Stop the running session.
    Stop {
        /// Optional note attached to the stop.
        label: Option<String>,
    },

    /// Record a free-text marker without changing the session state.
    Note {
        /// The marker text.
        label: String,
    },

    /// Import rows exported from the old spreadsheet log (JSON Lines).
    Import {
        /// File to read; stdin when omitted.
        file: Option<PathBuf>,
    },

    /// Render the daily work report.
    Report {
        /// Emit JSON instead of the human-readable report.
        #[arg(long)]
        json: bool,

        /// Calendar for the day grouping (overrides config).
        #[arg(long, value_enum)]
        calendar: Option<CalendarChoice>,
    },

    /// Show store and tracker state.
    Status,
}
