//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::resolve_config_path;
use crate::error::Result;
use crate::runner::OutputMode;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher resolving paths against `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli) -> Result<CommandResult> {
        let config_path = resolve_config_path(cli.config.as_deref(), &self.working_dir);
        let mode = if cli.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        };
        let colors = !cli.no_color;

        match &cli.command {
            Some(Commands::Run) => {
                let cmd = super::run::RunCommand::new(&config_path, cli.jobs, mode, colors);
                cmd.execute()
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(&config_path, args.clone());
                cmd.execute()
            }
            Some(Commands::Check) => {
                let cmd = super::check::CheckCommand::new(&config_path, mode);
                cmd.execute()
            }
            None => {
                // Default to the run command
                let cmd = super::run::RunCommand::new(&config_path, cli.jobs, mode, colors);
                cmd.execute()
            }
        }
    }
}
