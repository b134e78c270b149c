//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// meshsync configuration tool - create, check and migrate node configuration files
#[derive(Parser, Debug)]
#[command(name = "meshcfg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub target: Target,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which file to operate on and on behalf of which device.
#[derive(Args, Debug, Clone, Default)]
pub struct Target {
    /// Configuration file [default: <config dir>/meshsync/config.xml]
    #[arg(short, long, global = true, env = "MESHSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Identity of the local device
    #[arg(long, global = true, conflicts_with = "cert")]
    pub device_id: Option<String>,

    /// Certificate of the local device; its identity is derived from it
    #[arg(long, global = true)]
    pub cert: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Write a fresh configuration with defaults and the local device
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load the configuration and report its state
    Check,

    /// Rewrite the configuration at the current schema version
    Migrate,

    /// Compare the configuration with another file
    ///
    /// Both documents are normalized for the same device before comparing.
    Diff {
        /// The proposed configuration
        other: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Print the device identity derived from a certificate
    DeviceId,
}
