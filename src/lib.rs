//! parexec - Run groups of commands in parallel.
//!
//! A YAML file lists groups of commands. Commands within a group run one
//! after another on the same worker; groups run in parallel on a fixed pool
//! with one worker per CPU.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`job`] - Actions, jobs, and the job graph
//! - [`runner`] - Worker pool and reporting
//! - [`shell`] - Program execution
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use std::sync::Arc;
//! use parexec::config::parse_config;
//! use parexec::job::JobGraph;
//! use parexec::runner::{Coordinator, MemoryReporter, PoolSize};
//! use parexec::shell::MockRunner;
//!
//! let yaml = "functions:\n  - execdata:\n      - cmd: echo\n        args: [a]\n";
//! let config = parse_config(yaml, Path::new("config.yaml")).unwrap();
//! let graph = JobGraph::from_config(&config, Arc::new(MockRunner::new()));
//!
//! let reporter = Arc::new(MemoryReporter::new());
//! let summary = Coordinator::run(graph, PoolSize::new(2), reporter.clone()).unwrap();
//! assert_eq!(summary.jobs_completed(), 1);
//! assert_eq!(reporter.outputs(), vec!["a\n"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod job;
pub mod runner;
pub mod shell;

pub use error::{ParexecError, Result};
