//! Jobs, actions, and the job graph.
//!
//! A [`JobGraph`] holds one [`Job`] per configured group. A job is an
//! ordered list of [`Action`]s that a single worker runs one after another;
//! ordering is positional only, so a failed action never stops the rest.

pub mod action;
pub mod graph;

pub use action::{Action, ActionOutcome};
pub use graph::{Job, JobGraph, JobPlan, JobReport};
