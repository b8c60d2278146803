//! Job dispatch and reporting.

pub mod pool;
pub mod report;

pub use pool::{Coordinator, PoolSize, RunSummary, WorkerReport};
pub use report::{ConsoleReporter, MemoryReporter, OutputMode, ReportEvent, Reporter};
