//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Blob storage quickstart CLI
#[derive(Parser, Debug)]
#[command(name = "blobcursor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (JSON); falls back to the BLOBCURSOR_SETTINGS
    /// environment variable when omitted
    #[arg(short, long, global = true)]
    pub settings: Option<PathBuf>,

    /// Container to operate on
    #[arg(short, long, global = true, default_value = "quickstart")]
    pub container: String,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file as a blob
    Put {
        /// Blob name
        #[arg(long, default_value = "SampleBlob.txt")]
        blob: String,

        /// File to upload; a temporary sample file is created when omitted
        #[arg(long)]
        source: Option<PathBuf>,
    },

    /// List every blob in the container
    List {
        /// Maximum items per listing segment
        #[arg(long, default_value = "10")]
        max_results: u32,
    },

    /// Download a blob
    Get {
        /// Blob name
        #[arg(long, default_value = "SampleBlob.txt")]
        blob: String,

        /// Destination path; a temporary file is used when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a blob
    Delete {
        /// Blob name
        #[arg(long, default_value = "SampleBlob.txt")]
        blob: String,
    },

    /// Delete the container and everything in it
    Cleanup,

    /// Interactive command loop over stdin
    Shell,
}
