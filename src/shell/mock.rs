//! Mock process runner for testing.
//!
//! `MockRunner` implements [`ProcessRunner`] without spawning anything. It
//! records every invocation, fails programs it was told to fail, and tracks
//! how many commands were running at the same time.
//!
//! # Example
//!
//! ```
//! use parexec::shell::{CommandUnit, MockRunner, ProcessRunner};
//!
//! let runner = MockRunner::new().fail_program("false");
//!
//! assert!(runner.run(&CommandUnit::new("echo", vec!["hi".into()])).is_ok());
//! assert!(runner.run(&CommandUnit::new("false", vec![])).is_err());
//! assert_eq!(runner.invocations(), vec!["echo hi", "false"]);
//! ```

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use super::command::{CommandOutput, CommandUnit, ProcessRunner};
use crate::error::{ParexecError, Result};

/// Mock runner that echoes its arguments as output.
#[derive(Debug, Default)]
pub struct MockRunner {
    failing: HashSet<String>,
    delay: Option<Duration>,
    invocations: Mutex<Vec<String>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl MockRunner {
    /// Create a runner where every command succeeds instantly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every invocation of `program` exit with code 1.
    pub fn fail_program(mut self, program: &str) -> Self {
        self.failing.insert(program.to_string());
        self
    }

    /// Hold each invocation for `delay` before returning.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Rendered commands in the order they started.
    pub fn invocations(&self) -> Vec<String> {
        self.invocations
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }

    /// Highest number of commands that were running at once.
    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl ProcessRunner for MockRunner {
    fn run(&self, unit: &CommandUnit) -> Result<CommandOutput> {
        if let Ok(mut invocations) = self.invocations.lock() {
            invocations.push(unit.to_string());
        }

        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }

        self.active.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(unit.program()) {
            return Err(ParexecError::CommandFailed {
                command: unit.to_string(),
                code: Some(1),
            });
        }

        let mut stdout = unit.args().join(" ");
        stdout.push('\n');
        Ok(CommandOutput {
            exit_code: Some(0),
            stdout: stdout.into_bytes(),
            duration: self.delay.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_arguments() {
        let runner = MockRunner::new();
        let output = runner
            .run(&CommandUnit::new("echo", vec!["a".into(), "b".into()]))
            .unwrap();
        assert_eq!(output.stdout, b"a b\n");
    }

    #[test]
    fn sequential_calls_peak_at_one() {
        let runner = MockRunner::new();
        for _ in 0..3 {
            runner.run(&CommandUnit::new("true", vec![])).unwrap();
        }
        assert_eq!(runner.peak_concurrency(), 1);
        assert_eq!(runner.invocations().len(), 3);
    }
}
