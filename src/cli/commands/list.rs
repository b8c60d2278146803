//! List command implementation.
//!
//! The `parexec list` command shows each group and its commands in
//! execution order without running anything.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use console::Style;

use crate::cli::args::ListArgs;
use crate::config::load_validated;
use crate::error::{ParexecError, Result};
use crate::job::{JobGraph, JobPlan};
use crate::shell::SystemRunner;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    config_path: PathBuf,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(config_path: &Path, args: ListArgs) -> Self {
        Self {
            config_path: config_path.to_path_buf(),
            args,
        }
    }

    /// Load the configuration and describe its job graph.
    pub fn plan(&self) -> Result<Vec<JobPlan>> {
        let config = load_validated(&self.config_path)?;
        Ok(JobGraph::from_config(&config, Arc::new(SystemRunner)).plan())
    }
}

/// Render a plan as indented text, one group per block.
pub fn render_plan(plan: &[JobPlan], colors: bool) -> String {
    let (title, command) = if colors {
        (Style::new().bold(), Style::new().dim())
    } else {
        (Style::new(), Style::new())
    };

    let mut out = String::new();
    for job in plan {
        out.push_str(&format!("{}\n", title.apply_to(&job.label)));
        for (index, unit) in job.commands.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", index + 1, command.apply_to(unit)));
        }
    }
    out
}

impl Command for ListCommand {
    fn execute(&self) -> Result<CommandResult> {
        let plan = self.plan()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&plan)
                .map_err(|e| ParexecError::Other(e.into()))?;
            println!("{}", json);
        } else {
            print!("{}", render_plan(&plan, true));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn plan_follows_config_order() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "functions:\n  - name: first\n    execdata:\n      - cmd: echo\n        args: [a]\n      - cmd: ls\n",
        )
        .unwrap();

        let plan = ListCommand::new(&path, ListArgs::default()).plan().unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].label, "first");
        assert_eq!(
            render_plan(&plan, false),
            "first\n  1. echo a\n  2. ls\n"
        );
    }

    #[test]
    fn plan_serializes_to_json() {
        let plan = vec![JobPlan {
            label: "group-1".to_string(),
            commands: vec![crate::shell::CommandUnit::new("echo", vec!["hi".into()])],
        }];
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json[0]["label"], "group-1");
        assert_eq!(json[0]["commands"][0]["program"], "echo");
        assert_eq!(json[0]["commands"][0]["args"][0], "hi");
    }
}
