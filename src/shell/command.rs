//! Program execution.
//!
//! Commands are run directly, without a shell: the program name is looked
//! up on `PATH` and each argument is passed verbatim.

use crate::error::{ParexecError, Result};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// An immutable program-plus-arguments description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandUnit {
    program: String,
    args: Vec<String>,
}

impl CommandUnit {
    /// Create a command unit.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Program name as given in the configuration.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments in declared order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Output of a command that exited successfully.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code (always 0 for a successful run on most platforms).
    pub exit_code: Option<i32>,

    /// Captured standard output, byte for byte.
    pub stdout: Vec<u8>,

    /// Execution duration.
    pub duration: Duration,
}

impl CommandOutput {
    /// Standard output as text, with invalid UTF-8 replaced.
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }
}

/// Runs a [`CommandUnit`] to completion.
///
/// Implementations block the calling thread until the program exits.
/// Anything other than a successful exit is an error.
pub trait ProcessRunner: Send + Sync {
    /// Run the command and capture its standard output.
    fn run(&self, unit: &CommandUnit) -> Result<CommandOutput>;
}

/// Runs commands as real OS processes.
///
/// Standard output is captured; standard error is inherited so diagnostics
/// reach the terminal directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, unit: &CommandUnit) -> Result<CommandOutput> {
        let start = Instant::now();

        let output = Command::new(unit.program())
            .args(unit.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| ParexecError::SpawnFailed {
                command: unit.program().to_string(),
                message: e.to_string(),
            })?;

        let duration = start.elapsed();

        if !output.status.success() {
            return Err(ParexecError::CommandFailed {
                command: unit.to_string(),
                code: output.status.code(),
            });
        }

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            duration,
        })
    }
}
