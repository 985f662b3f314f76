//! CLI parse: clap types for treefs. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// treefs - in-memory hierarchical namespace with an interactive shell
#[derive(Parser, Debug)]
#[command(name = "treefs")]
#[command(about = "In-memory filesystem built on hash-indexed AVL directories and rope files")]
pub struct Cli {
    /// Command to run (default: shell)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory searched for treefs.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Enable debug-level logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (when output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// The requested command, defaulting to the interactive shell.
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Shell)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive shell on stdin
    Shell,
    /// Execute shell commands from a script file, one per line
    Run {
        /// Script path; lines starting with '#' are skipped
        script: PathBuf,
    },
    /// Print the effective configuration
    Config {
        /// Output format (toml or json)
        #[arg(long, default_value = "toml")]
        format: String,
    },
}
