//! The place where the command line is defined.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ferrum-config")]
#[command(about = "Load and inspect the read-only config tables", long_about = None)]
pub struct CliParser {
    /// Directory of the table data files, takes precedence over FERRUM_CONFIG_DIR.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Refuse tables with duplicate ids instead of keeping the last row.
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the known tables and where their data files are expected.
    Tables,

    /// Load one table and print all of its rows.
    Inspect {
        table: String,

        /// Read this file instead of the table's default data file.
        #[arg(long)]
        file: Option<PathBuf>,

        /// Print the rows as a single JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Load one table and print the row with the given id.
    Get {
        table: String,

        #[arg(allow_negative_numbers = true)]
        id: i32,

        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Load every table and report the row counts.
    Load,
}
