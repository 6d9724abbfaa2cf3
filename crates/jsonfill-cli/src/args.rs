//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "jsonfill",
    version,
    about = "Context-aware JSON value completion",
    long_about = "Computes completion edits for JSON documents that are mid-edit: \
                  what range to overwrite, what to insert, and whether a trailing \
                  comma is needed. Malformed JSON is expected input."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute completion edits for candidate values at a cursor position
    Complete {
        /// JSON document to read
        file: PathBuf,
        /// Cursor as a byte offset
        #[arg(long, conflicts_with_all = ["line", "character"])]
        offset: Option<u32>,
        /// Cursor line, 0-indexed (use with --character)
        #[arg(long, requires = "character")]
        line: Option<u32>,
        /// Cursor column in UTF-16 units, 0-indexed (use with --line)
        #[arg(long, requires = "line")]
        character: Option<u32>,
        /// Candidate values, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<String>,
        /// Emit machine-readable JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },
    /// Resolve the structural path and previous node at a cursor position
    Locate {
        /// JSON document to read
        file: PathBuf,
        /// Cursor as a byte offset
        #[arg(long, conflicts_with_all = ["line", "character"])]
        offset: Option<u32>,
        /// Cursor line, 0-indexed (use with --character)
        #[arg(long, requires = "character")]
        line: Option<u32>,
        /// Cursor column in UTF-16 units, 0-indexed (use with --line)
        #[arg(long, requires = "line")]
        character: Option<u32>,
        /// Emit machine-readable JSON instead of human-readable output
        #[arg(long)]
        json: bool,
    },
    /// Dump the token stream with spans and scan errors
    Tokens {
        /// JSON document to read
        file: PathBuf,
        /// Include whitespace, line break, and comment trivia
        #[arg(long)]
        trivia: bool,
    },
}
