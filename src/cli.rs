use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "convoy")]
#[command(about = "Define and run multi-instance applications against a virtualization control plane")]
pub struct Cli {
    /// Manifest file path (defaults to convoy.yaml)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Working directory for manifest discovery
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Target remote, overriding the manifest
    #[arg(long, env = "CONVOY_REMOTE")]
    pub remote: Option<String>,

    /// Type of the default network (bridge or ovn)
    #[arg(long, env = "CONVOY_NETWORK_TYPE")]
    pub network_type: Option<String>,

    /// Uplink for the default network if it is ovn
    #[arg(long, env = "CONVOY_NETWORK_UPLINK")]
    pub network_uplink: Option<String>,

    /// Control-plane project to operate in
    #[arg(long, env = "CONVOY_PROJECT")]
    pub project: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the declared networks and instances in dependency order
    Up {
        /// Print the operations without issuing remote calls
        #[arg(long)]
        dry_run: bool,
    },
    /// Destroy instances and networks in reverse dependency order
    Down {
        /// Print the operations without issuing remote calls
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the create and destroy plans
    Plan,
    /// Validate the manifest and dependency graph without remote calls
    Validate,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: clap_complete::Shell,
    },
}
