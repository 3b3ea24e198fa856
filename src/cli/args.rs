//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strm Mounter - Mirror your download catalog as .strm pointer files
#[derive(Parser, Debug)]
#[command(name = "strm-mounter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Skip preflight checks
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a .strm file for every download in the catalog
    Mount {
        /// JSON file with the download listing ("-" reads stdin)
        #[arg(short, long, value_name = "FILE")]
        downloads: PathBuf,

        /// Mount root (overrides config and STRM_MOUNT_PATH)
        #[arg(short, long, value_name = "DIR")]
        mount: Option<PathBuf>,

        /// Disable AI filename cleanup even if an API key is set
        #[arg(long)]
        no_ai: bool,

        /// Save a JSON report of every record's outcome
        #[arg(short, long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Remove all previously written .strm files
    Unmount {
        /// Mount root (overrides config and STRM_MOUNT_PATH)
        #[arg(short, long, value_name = "DIR")]
        mount: Option<PathBuf>,
    },

    /// Run preflight checks and exit
    Check {
        /// Mount root (overrides config and STRM_MOUNT_PATH)
        #[arg(short, long, value_name = "DIR")]
        mount: Option<PathBuf>,
    },
}
