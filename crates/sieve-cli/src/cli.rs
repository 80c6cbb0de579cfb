//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use sieve::ColumnType;
use std::path::PathBuf;

/// Sieve: inspect, clean and search delimited datasets
#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Field delimiter of the input file
    #[arg(short, long, global = true, default_value = ",")]
    pub delimiter: char,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the inferred schema and quality statistics of a data file
    Inspect {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply schema edits and cleaning operations, optionally saving a snapshot
    Clean {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Cleaning operation id (repeatable, see `sieve operations`)
        #[arg(long = "op", value_name = "OPERATION", required = true)]
        ops: Vec<String>,

        /// Rename a column: ORIGINAL=DISPLAY
        #[arg(long, value_name = "ORIGINAL=DISPLAY", value_parser = parse_assignment)]
        rename: Vec<(String, String)>,

        /// Hide a column
        #[arg(long, value_name = "COLUMN")]
        hide: Vec<String>,

        /// Change a column's type hint: COLUMN=TYPE (text, number, boolean, date)
        #[arg(long, value_name = "COLUMN=TYPE", value_parser = parse_retype)]
        retype: Vec<(String, ColumnType)>,

        /// Write the cleaned snapshot to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Check every column for nulls, not only visible ones
        #[arg(long)]
        all_columns: bool,
    },

    /// Search rows by case-insensitive substring
    Search {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Text to look for (omit for a preview of the first rows)
        #[arg(value_name = "QUERY", default_value = "")]
        query: String,

        /// Rows shown for an empty query
        #[arg(short, long, default_value_t = sieve::search::PREVIEW_LIMIT)]
        limit: usize,
    },

    /// Summarize a saved snapshot
    Status {
        /// Path to the snapshot file
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Bulk-insert a saved snapshot's rows into a remote table
    Publish {
        /// Path to the snapshot file
        #[arg(value_name = "SNAPSHOT")]
        file: PathBuf,

        /// Target table name
        #[arg(short, long)]
        table: String,

        /// Base URL of the table store (default: $SIEVE_SINK_URL)
        #[arg(long)]
        url: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// List the available cleaning operations
    Operations,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected NAME=VALUE, got '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Missing column name in '{}'", s));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

fn parse_retype(s: &str) -> Result<(String, ColumnType), String> {
    let (column, kind) = parse_assignment(s)?;
    let column_type = kind.parse::<ColumnType>().map_err(|e| e.to_string())?;
    Ok((column, column_type))
}
