//! Run command implementation.
//!
//! The `parexec run` command executes every group in the configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use console::Style;

use crate::config::load_validated;
use crate::error::Result;
use crate::job::JobGraph;
use crate::runner::{ConsoleReporter, Coordinator, OutputMode, PoolSize, Reporter, RunSummary};
use crate::shell::{ProcessRunner, SystemRunner};

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand {
    config_path: PathBuf,
    jobs: Option<usize>,
    mode: OutputMode,
    colors: bool,
}

impl RunCommand {
    /// Create a new run command. `jobs` overrides the pool size.
    pub fn new(config_path: &Path, jobs: Option<usize>, mode: OutputMode, colors: bool) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            jobs,
            mode,
            colors,
        }
    }

    /// Pool size from `--jobs`, or one worker per CPU.
    pub fn pool_size(&self) -> PoolSize {
        self.jobs.map(PoolSize::new).unwrap_or_else(PoolSize::detect)
    }

    /// Load the configuration and run it with the given collaborators.
    ///
    /// The configuration is read and validated before any worker starts.
    pub fn run_with(
        &self,
        runner: Arc<dyn ProcessRunner>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<RunSummary> {
        let config = load_validated(&self.config_path)?;
        let graph = JobGraph::from_config(&config, runner);
        let pool_size = self.pool_size();

        tracing::info!(
            "Running {} groups on {} workers from {}",
            graph.len(),
            pool_size,
            self.config_path.display()
        );

        Coordinator::run(graph, pool_size, reporter)
    }
}

impl Command for RunCommand {
    fn execute(&self) -> Result<CommandResult> {
        let reporter = Arc::new(ConsoleReporter::new(self.mode, self.colors));
        let summary = self.run_with(Arc::new(SystemRunner), reporter)?;

        if self.mode.shows_notices() {
            let style = if summary.success() || !self.colors {
                Style::new().dim()
            } else {
                Style::new().color256(208)
            };
            let groups = if summary.jobs_completed() == 1 {
                "group"
            } else {
                "groups"
            };
            eprintln!(
                "{}",
                style.apply_to(format!(
                    "{} {} completed, {} actions failed",
                    summary.jobs_completed(),
                    groups,
                    summary.actions_failed()
                ))
            );
        }

        // Failed actions are reported inline and do not change the exit code
        Ok(CommandResult::success())
    }
}
