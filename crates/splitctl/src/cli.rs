//! CLI - Command-line argument parsing
//!
//! Keeps argument parsing separate from execution logic.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Split a receipt between friends
#[derive(Parser, Debug)]
#[command(name = "splitctl")]
#[command(about = "Scan receipts and split bills with a proportional tip", long_about = None)]
#[command(version = crate::VERSION)]
pub struct Cli {
    /// Config file (overrides $SPLIT_CONFIG and the default location)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Extract the items of a receipt photo
    Scan {
        /// Receipt image (jpeg, png, webp, ...)
        image: PathBuf,

        /// Print a bill document instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show what everyone owes for a bill document
    Summary {
        /// Bill document, or `-` for stdin
        bill: String,

        /// Tip percentage (overrides the document)
        #[arg(long)]
        tip: Option<f64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Assign every item to every participant
    QuickSplit {
        /// Bill document, or `-` for stdin
        bill: String,

        /// Print the updated bill document instead of a summary
        #[arg(long)]
        json: bool,
    },
}
