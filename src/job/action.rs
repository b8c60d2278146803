//! Actions: one command execution step within a job.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::error::{ParexecError, Result};
use crate::shell::{CommandOutput, CommandUnit, ProcessRunner};

/// A command unit paired with the runner that executes it.
///
/// Building an action has no side effects. Each call to [`Action::invoke`]
/// runs the program again.
#[derive(Clone)]
pub struct Action {
    name: Option<String>,
    unit: CommandUnit,
    runner: Arc<dyn ProcessRunner>,
}

impl Action {
    /// Create an action for `unit`.
    pub fn new(name: Option<String>, unit: CommandUnit, runner: Arc<dyn ProcessRunner>) -> Self {
        Self { name, unit, runner }
    }

    /// Display name from the configuration, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The command this action runs.
    pub fn unit(&self) -> &CommandUnit {
        &self.unit
    }

    /// Run the command and return its outcome.
    pub fn invoke(&self) -> ActionOutcome {
        tracing::debug!("Spawning {}", self.unit);
        let result = self.runner.run(&self.unit);
        if let Err(e) = &result {
            tracing::warn!("{}", e);
        }

        ActionOutcome {
            name: self.name.clone(),
            unit: self.unit.clone(),
            result,
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("unit", &self.unit)
            .finish_non_exhaustive()
    }
}

/// Result of invoking one action.
#[derive(Debug)]
pub struct ActionOutcome {
    /// Display name of the action.
    pub name: Option<String>,

    /// The command that was run.
    pub unit: CommandUnit,

    /// Captured output, or why the command failed.
    pub result: Result<CommandOutput>,
}

impl ActionOutcome {
    /// Whether the command exited successfully.
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    /// Captured standard output on success, as text.
    pub fn output(&self) -> Option<Cow<'_, str>> {
        self.result.as_ref().ok().map(|o| o.stdout_text())
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&ParexecError> {
        self.result.as_ref().err()
    }
}
