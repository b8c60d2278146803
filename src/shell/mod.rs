//! Program execution.

pub mod command;
pub mod mock;

pub use command::{CommandOutput, CommandUnit, ProcessRunner, SystemRunner};
pub use mock::MockRunner;
