//! Bounded worker pool.
//!
//! The [`Coordinator`] owns a rendezvous channel and a fixed set of worker
//! threads. Submitting a job blocks until an idle worker takes it, so at most
//! `pool_size` jobs run at once and no job waits in a queue. Closing the
//! channel makes each worker exit once it is idle.
//!
//! ```text
//!                 ┌──> worker-0 => [kubectl get ns]
//!   coordinator ──┤
//!                 └──> worker-1 => [echo "hi there", ls .]
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crate::error::{ParexecError, Result};
use crate::job::{ActionOutcome, Job, JobGraph, JobReport};

use super::report::Reporter;

/// Number of workers in the pool, always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSize(NonZeroUsize);

impl PoolSize {
    /// Create a pool size; zero is raised to one.
    pub fn new(workers: usize) -> Self {
        Self(NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN))
    }

    /// One worker per available processing unit.
    pub fn detect() -> Self {
        match thread::available_parallelism() {
            Ok(n) => Self(n),
            Err(e) => {
                tracing::debug!("Could not detect parallelism ({}), using 1 worker", e);
                Self(NonZeroUsize::MIN)
            }
        }
    }

    /// Number of workers.
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for PoolSize {
    fn default() -> Self {
        Self::detect()
    }
}

impl fmt::Display for PoolSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Jobs completed by one worker, returned when it exits.
#[derive(Debug)]
pub struct WorkerReport {
    /// Worker index.
    pub worker: usize,

    /// Reports in the order the worker completed them.
    pub jobs: Vec<JobReport>,
}

struct Worker {
    id: usize,
    handle: JoinHandle<WorkerReport>,
}

impl Worker {
    fn spawn(
        id: usize,
        receiver: Arc<Mutex<Receiver<Job>>>,
        reporter: Arc<dyn Reporter>,
    ) -> Result<Self> {
        let handle = thread::Builder::new()
            .name(format!("parexec-worker-{}", id))
            .spawn(move || work(id, &receiver, reporter.as_ref()))?;
        Ok(Self { id, handle })
    }
}

/// Claim and run jobs until the channel is closed and drained.
fn work(id: usize, receiver: &Mutex<Receiver<Job>>, reporter: &dyn Reporter) -> WorkerReport {
    tracing::debug!(worker = id, "Worker started");
    let mut jobs = Vec::new();

    loop {
        // The guard is released at the end of this statement, before the job runs
        let next = receiver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .recv();
        let Ok(job) = next else {
            break;
        };

        tracing::debug!(worker = id, job = job.id(), "Running {}", job.label());
        let report = job.run(reporter);
        tracing::debug!(
            worker = id,
            job = job.id(),
            failed = report.failures().count(),
            "Completed {}",
            job.label()
        );
        jobs.push(report);
    }

    tracing::debug!(worker = id, jobs = jobs.len(), "Worker exiting");
    WorkerReport { worker: id, jobs }
}

/// Owns the worker pool and the distribution channel.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use parexec::job::JobGraph;
/// use parexec::runner::{Coordinator, MemoryReporter, PoolSize};
///
/// let mut coordinator = Coordinator::start(PoolSize::new(2), Arc::new(MemoryReporter::new())).unwrap();
/// coordinator.submit_all(JobGraph::default()).unwrap();
/// coordinator.shutdown();
/// let summary = coordinator.join().unwrap();
/// assert_eq!(summary.jobs_completed(), 0);
/// ```
pub struct Coordinator {
    sender: Option<SyncSender<Job>>,
    workers: Vec<Worker>,
    pool_size: PoolSize,
}

impl Coordinator {
    /// Start `pool_size` workers waiting on a fresh channel.
    pub fn start(pool_size: PoolSize, reporter: Arc<dyn Reporter>) -> Result<Self> {
        let (sender, receiver) = mpsc::sync_channel(0);
        let receiver = Arc::new(Mutex::new(receiver));

        let workers = (0..pool_size.get())
            .map(|id| Worker::spawn(id, Arc::clone(&receiver), Arc::clone(&reporter)))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Started {} workers", pool_size);
        Ok(Self {
            sender: Some(sender),
            workers,
            pool_size,
        })
    }

    /// Run a whole graph: start, submit every job, close, and wait.
    pub fn run(
        graph: JobGraph,
        pool_size: PoolSize,
        reporter: Arc<dyn Reporter>,
    ) -> Result<RunSummary> {
        let coordinator = Self::start(pool_size, reporter)?;
        if let Err(e) = coordinator.submit_all(graph) {
            // A closed channel usually means the workers died; their panic
            // is the error worth reporting
            coordinator.join()?;
            return Err(e);
        }
        coordinator.join()
    }

    /// Number of workers in the pool.
    pub fn pool_size(&self) -> PoolSize {
        self.pool_size
    }

    /// Hand a job to an idle worker, blocking until one takes it.
    ///
    /// # Errors
    ///
    /// Returns `PoolClosed` after [`shutdown`](Self::shutdown), or when no
    /// worker is left to receive the job.
    pub fn submit(&self, job: Job) -> Result<()> {
        let sender = self.sender.as_ref().ok_or(ParexecError::PoolClosed)?;
        sender.send(job).map_err(|_| ParexecError::PoolClosed)
    }

    /// Submit every job in graph order. Returns how many were submitted.
    pub fn submit_all(&self, graph: JobGraph) -> Result<usize> {
        let mut submitted = 0;
        for job in graph {
            self.submit(job)?;
            submitted += 1;
        }
        Ok(submitted)
    }

    /// Close the channel; workers exit once idle. Safe to call twice.
    pub fn shutdown(&mut self) {
        if self.sender.take().is_some() {
            tracing::debug!("Distribution channel closed");
        }
    }

    /// Close the channel and wait for every worker to exit.
    ///
    /// # Errors
    ///
    /// Returns `WorkerPanicked` naming the first worker that panicked. All
    /// workers are still waited for.
    pub fn join(mut self) -> Result<RunSummary> {
        self.shutdown();

        let mut reports = Vec::with_capacity(self.workers.len());
        let mut panicked = None;
        for worker in std::mem::take(&mut self.workers) {
            match worker.handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    tracing::error!("Worker {} panicked", worker.id);
                    panicked.get_or_insert(worker.id);
                }
            }
        }

        match panicked {
            Some(worker) => Err(ParexecError::WorkerPanicked { worker }),
            None => Ok(RunSummary::from_workers(self.pool_size, reports)),
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.shutdown();
        for worker in self.workers.drain(..) {
            let _ = worker.handle.join();
        }
    }
}

impl fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Coordinator")
            .field("pool_size", &self.pool_size)
            .field("open", &self.sender.is_some())
            .field("workers", &self.workers.len())
            .finish()
    }
}

/// Outcome of a whole run.
#[derive(Debug)]
pub struct RunSummary {
    /// Workers that took part.
    pub pool_size: PoolSize,

    /// One report per job, sorted by job id.
    pub jobs: Vec<JobReport>,
}

impl RunSummary {
    fn from_workers(pool_size: PoolSize, workers: Vec<WorkerReport>) -> Self {
        let mut jobs: Vec<JobReport> = workers.into_iter().flat_map(|w| w.jobs).collect();
        jobs.sort_by_key(|j| j.job_id);
        Self { pool_size, jobs }
    }

    /// Number of jobs that ran to completion.
    pub fn jobs_completed(&self) -> usize {
        self.jobs.len()
    }

    /// Number of actions attempted.
    pub fn actions_run(&self) -> usize {
        self.jobs.iter().map(|j| j.outcomes.len()).sum()
    }

    /// Number of actions that failed.
    pub fn actions_failed(&self) -> usize {
        self.failures().count()
    }

    /// Every failed action with the job it belonged to.
    pub fn failures(&self) -> impl Iterator<Item = (&JobReport, &ActionOutcome)> {
        self.jobs
            .iter()
            .flat_map(|j| j.failures().map(move |o| (j, o)))
    }

    /// Whether every action succeeded.
    pub fn success(&self) -> bool {
        self.failures().next().is_none()
    }
}
