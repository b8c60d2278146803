//! Check command implementation.
//!
//! The `parexec check` command loads and validates the configuration
//! without starting any workers.

use std::path::{Path, PathBuf};

use crate::config::load_validated;
use crate::error::Result;
use crate::runner::OutputMode;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    config_path: PathBuf,
    mode: OutputMode,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(config_path: &Path, mode: OutputMode) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            mode,
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self) -> Result<CommandResult> {
        let config = load_validated(&self.config_path)?;
        let commands: usize = config.functions.iter().map(|g| g.execdata.len()).sum();

        if self.mode.shows_notices() {
            println!(
                "ok: {} groups, {} commands in {}",
                config.functions.len(),
                commands,
                self.config_path.display()
            );
        }

        Ok(CommandResult::success())
    }
}
