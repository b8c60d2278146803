//! Reporting action progress and outcomes.
//!
//! Workers call a shared [`Reporter`] from many threads at once. Captured
//! output is written in one locked write so a command's output is never
//! interleaved with another's.

use std::io::{self, Write};
use std::sync::Mutex;

use console::Style;

use crate::job::{Action, ActionOutcome, Job};

/// Receives action events from workers.
pub trait Reporter: Send + Sync {
    /// Called right before an action is invoked.
    fn action_started(&self, job: &Job, action: &Action);

    /// Called after an action has finished, successfully or not.
    fn action_finished(&self, job: &Job, outcome: &ActionOutcome);
}

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show "executing" notices, command output, and errors.
    #[default]
    Normal,
    /// Show command output and errors only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows the notice printed before each command.
    pub fn shows_notices(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Reporter that writes to standard output.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    mode: OutputMode,
    notice: Style,
    error: Style,
}

impl ConsoleReporter {
    /// Create a console reporter.
    ///
    /// With `colors` set, styling still switches off when stdout is not a
    /// terminal.
    pub fn new(mode: OutputMode, colors: bool) -> Self {
        let (notice, error) = if colors {
            (Style::new().magenta(), Style::new().red().bold())
        } else {
            (Style::new(), Style::new())
        };
        Self {
            mode,
            notice,
            error,
        }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Bytes written once an action finishes.
    ///
    /// Successful output is passed through unchanged and followed by a
    /// newline, even when the command printed nothing.
    pub fn render_finished(&self, job: &Job, outcome: &ActionOutcome) -> Vec<u8> {
        match &outcome.result {
            Ok(output) => {
                let mut bytes = output.stdout.clone();
                bytes.push(b'\n');
                bytes
            }
            Err(e) => {
                let line = format!("error: {}: {}", job.label(), e);
                format!("{}\n", self.error.apply_to(line)).into_bytes()
            }
        }
    }

    fn write_all(&self, bytes: &[u8]) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        // A closed stdout must not take the worker down with it
        let _ = lock.write_all(bytes);
        let _ = lock.flush();
    }
}

impl Reporter for ConsoleReporter {
    fn action_started(&self, _job: &Job, action: &Action) {
        if self.mode.shows_notices() {
            let line = format!("executing {}\n", action.unit().program());
            self.write_all(self.notice.apply_to(line).to_string().as_bytes());
        }
    }

    fn action_finished(&self, job: &Job, outcome: &ActionOutcome) {
        self.write_all(&self.render_finished(job, outcome));
    }
}

/// An event recorded by [`MemoryReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// An action started.
    Started { job: usize, command: String },
    /// An action succeeded with the given output.
    Succeeded {
        job: usize,
        command: String,
        output: String,
    },
    /// An action failed with the given message.
    Failed {
        job: usize,
        command: String,
        error: String,
    },
}

/// Reporter that records events in memory.
///
/// # Example
///
/// ```
/// use parexec::runner::MemoryReporter;
///
/// let reporter = MemoryReporter::new();
/// assert!(reporter.events().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<ReportEvent>>,
}

impl MemoryReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in the order they were reported.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Captured output of successful actions, in report order.
    pub fn outputs(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ReportEvent::Succeeded { output, .. } => Some(output),
                _ => None,
            })
            .collect()
    }

    /// Events belonging to one job.
    pub fn events_for(&self, job: usize) -> Vec<ReportEvent> {
        self.events()
            .into_iter()
            .filter(|e| match e {
                ReportEvent::Started { job: j, .. }
                | ReportEvent::Succeeded { job: j, .. }
                | ReportEvent::Failed { job: j, .. } => *j == job,
            })
            .collect()
    }

    fn push(&self, event: ReportEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Reporter for MemoryReporter {
    fn action_started(&self, job: &Job, action: &Action) {
        self.push(ReportEvent::Started {
            job: job.id(),
            command: action.unit().to_string(),
        });
    }

    fn action_finished(&self, job: &Job, outcome: &ActionOutcome) {
        let command = outcome.unit.to_string();
        let event = match &outcome.result {
            Ok(output) => ReportEvent::Succeeded {
                job: job.id(),
                command,
                output: output.stdout_text().into_owned(),
            },
            Err(e) => ReportEvent::Failed {
                job: job.id(),
                command,
                error: e.to_string(),
            },
        };
        self.push(event);
    }
}
