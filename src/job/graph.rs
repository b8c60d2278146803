//! Jobs and the job graph built from configuration.

use std::sync::Arc;

use serde::Serialize;

use super::action::{Action, ActionOutcome};
use crate::config::ParexecConfig;
use crate::runner::Reporter;
use crate::shell::{CommandUnit, ProcessRunner};

/// An ordered chain of actions executed by a single worker.
#[derive(Debug, Clone)]
pub struct Job {
    id: usize,
    label: String,
    actions: Vec<Action>,
}

impl Job {
    /// Create a job. `id` is its position in the graph.
    pub fn new(id: usize, label: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            id,
            label: label.into(),
            actions,
        }
    }

    /// Position of the job in its graph.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Label used in reports.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Actions in execution order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Run every action in order.
    ///
    /// A failed action is reported and the next one still runs; the job
    /// completes once the last action has been attempted.
    pub fn run(&self, reporter: &dyn Reporter) -> JobReport {
        let mut outcomes = Vec::with_capacity(self.actions.len());

        for action in &self.actions {
            reporter.action_started(self, action);
            let outcome = action.invoke();
            reporter.action_finished(self, &outcome);
            outcomes.push(outcome);
        }

        JobReport {
            job_id: self.id,
            label: self.label.clone(),
            outcomes,
        }
    }
}

/// Outcomes of a completed job.
#[derive(Debug)]
pub struct JobReport {
    /// Position of the job in its graph.
    pub job_id: usize,

    /// Job label.
    pub label: String,

    /// One outcome per action, in execution order.
    pub outcomes: Vec<ActionOutcome>,
}

impl JobReport {
    /// Outcomes that failed.
    pub fn failures(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter().filter(|o| !o.succeeded())
    }

    /// Whether every action succeeded.
    pub fn success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Independent jobs derived from configuration.
#[derive(Debug, Clone, Default)]
pub struct JobGraph {
    jobs: Vec<Job>,
}

impl JobGraph {
    /// Create a graph from prebuilt jobs.
    pub fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// Build one job per group, one action per command descriptor.
    pub fn from_config(config: &ParexecConfig, runner: Arc<dyn ProcessRunner>) -> Self {
        let jobs = config
            .functions
            .iter()
            .enumerate()
            .map(|(id, group)| {
                let actions = group
                    .execdata
                    .iter()
                    .map(|f| {
                        Action::new(
                            f.name.clone(),
                            CommandUnit::new(f.cmd.clone(), f.args.clone()),
                            Arc::clone(&runner),
                        )
                    })
                    .collect();
                Job::new(id, group.label(id), actions)
            })
            .collect();

        Self { jobs }
    }

    /// Number of jobs.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Whether the graph has no jobs.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Iterate jobs in graph order.
    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }

    /// Serializable view for listing.
    pub fn plan(&self) -> Vec<JobPlan> {
        self.jobs
            .iter()
            .map(|job| JobPlan {
                label: job.label.clone(),
                commands: job.actions.iter().map(|a| a.unit().clone()).collect(),
            })
            .collect()
    }
}

impl IntoIterator for JobGraph {
    type Item = Job;
    type IntoIter = std::vec::IntoIter<Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.into_iter()
    }
}

impl<'a> IntoIterator for &'a JobGraph {
    type Item = &'a Job;
    type IntoIter = std::slice::Iter<'a, Job>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

/// A job's label and commands, without the runner.
#[derive(Debug, Clone, Serialize)]
pub struct JobPlan {
    pub label: String,
    pub commands: Vec<CommandUnit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::runner::MemoryReporter;
    use crate::shell::MockRunner;
    use std::path::Path;

    const TWO_GROUPS: &str = r#"
functions:
  - execdata:
      - name: "k8s get namespace"
        cmd: kubectl
        args: ["get", "ns"]
  - name: listing
    execdata:
      - name: echoing
        cmd: echo
        args: ["hi there"]
      - name: lsing
        cmd: ls
        args: ["."]
"#;

    fn graph(runner: Arc<MockRunner>) -> JobGraph {
        let config = parse_config(TWO_GROUPS, Path::new("config.yaml")).unwrap();
        JobGraph::from_config(&config, runner)
    }

    #[test]
    fn from_config_builds_one_job_per_group() {
        let graph = graph(Arc::new(MockRunner::new()));

        assert_eq!(graph.len(), 2);
        let labels: Vec<_> = graph.iter().map(|j| j.label()).collect();
        assert_eq!(labels, vec!["group-1", "listing"]);

        let second: Vec<_> = graph
            .iter()
            .nth(1)
            .unwrap()
            .actions()
            .iter()
            .map(|a| a.unit().to_string())
            .collect();
        assert_eq!(second, vec!["echo hi there", "ls ."]);
    }

    #[test]
    fn from_config_runs_nothing() {
        let runner = Arc::new(MockRunner::new());
        let _graph = graph(runner.clone());
        assert!(runner.invocations().is_empty());
    }

    #[test]
    fn job_runs_actions_in_declared_order() {
        let runner = Arc::new(MockRunner::new());
        let graph = graph(runner.clone());
        let job = graph.iter().nth(1).unwrap();

        let report = job.run(&MemoryReporter::new());

        assert_eq!(runner.invocations(), vec!["echo hi there", "ls ."]);
        assert_eq!(report.outcomes.len(), 2);
        assert!(report.success());
    }

    #[test]
    fn failed_action_does_not_stop_the_job() {
        let runner = Arc::new(MockRunner::new().fail_program("false"));
        let job = Job::new(
            0,
            "chain",
            vec![
                Action::new(None, CommandUnit::new("false", vec![]), runner.clone()),
                Action::new(None, CommandUnit::new("echo", vec!["ok".into()]), runner.clone()),
            ],
        );
        let reporter = MemoryReporter::new();

        let report = job.run(&reporter);

        assert_eq!(runner.invocations(), vec!["false", "echo ok"]);
        assert_eq!(report.failures().count(), 1);
        assert_eq!(report.outcomes[1].output().as_deref(), Some("ok\n"));
        assert_eq!(reporter.outputs(), vec!["ok\n"]);
    }

    #[test]
    fn every_action_runs_exactly_once_when_all_fail() {
        let runner = Arc::new(MockRunner::new().fail_program("false"));
        let actions = (0..4)
            .map(|_| Action::new(None, CommandUnit::new("false", vec![]), runner.clone()))
            .collect();
        let job = Job::new(0, "failing", actions);

        let report = job.run(&MemoryReporter::new());

        assert_eq!(runner.invocations().len(), 4);
        assert_eq!(report.failures().count(), 4);
    }

    #[test]
    fn empty_job_completes_immediately() {
        let job = Job::new(0, "empty", Vec::new());
        let report = job.run(&MemoryReporter::new());
        assert!(report.outcomes.is_empty());
        assert!(report.success());
    }

    #[test]
    fn plan_lists_commands() {
        let graph = graph(Arc::new(MockRunner::new()));
        let plan = graph.plan();
        assert_eq!(plan[0].commands[0].to_string(), "kubectl get ns");
    }
}
