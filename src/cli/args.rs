//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// parexec - Run command groups sequentially within a group, in parallel across groups.
#[derive(Debug, Parser)]
#[command(name = "parexec")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (defaults to config.yaml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of workers (defaults to the number of CPUs)
    #[arg(short, long, global = true, value_name = "N")]
    pub jobs: Option<usize>,

    /// Only print command output and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run every group (default if no command specified)
    Run,

    /// Show the groups and their commands without running them
    List(ListArgs),

    /// Validate the configuration file
    Check,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
