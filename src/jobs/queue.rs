//! Job queues cooking jobs are handed to
//!
//! # Architecture
//!
//! ```text
//! OrderIntake ──▶ JobQueue::enqueue() ──▶ mpsc channel ──▶ worker ──▶ JoinSet of CookingJobRunner::run
//! ```
//!
//! Delivery is best effort: a failed job is logged by the worker and dropped.

use super::cooking::{CookingJob, CookingJobRunner};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle, JoinSet};

/// Anything that accepts "run this cooking job later"
#[async_trait]
pub trait JobQueue: Send + Sync {
    async fn enqueue(&self, job: CookingJob) -> Result<()>;
}

/// Queue backed by a tokio channel and a worker task
///
/// Jobs run concurrently with each other and with HTTP traffic, in no
/// particular order. Once every clone of the queue is dropped the worker
/// waits for in-flight jobs and exits.
#[derive(Clone)]
pub struct TokioJobQueue {
    sender: mpsc::UnboundedSender<CookingJob>,
}

impl TokioJobQueue {
    /// Spawn the worker and return the queue feeding it
    pub fn start(runner: CookingJobRunner) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(runner, receiver));
        (Self { sender }, worker)
    }
}

#[async_trait]
impl JobQueue for TokioJobQueue {
    async fn enqueue(&self, job: CookingJob) -> Result<()> {
        let job_id = job.job_id;
        self.sender
            .send(job)
            .map_err(|_| anyhow!("Job worker is not running"))?;

        tracing::debug!(job_id = %job_id, "Cooking job enqueued");
        Ok(())
    }
}

async fn run_worker(runner: CookingJobRunner, mut receiver: mpsc::UnboundedReceiver<CookingJob>) {
    tracing::info!("Cooking job worker started");
    let runner = Arc::new(runner);
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            received = receiver.recv() => match received {
                Some(job) => {
                    let runner = runner.clone();
                    in_flight.spawn(async move {
                        if let Err(e) = runner.run(&job).await {
                            tracing::warn!(job_id = %job.job_id, "Cooking job failed, discarding: {}", e);
                        }
                    });
                }
                None => break,
            },
            Some(finished) = in_flight.join_next(), if !in_flight.is_empty() => {
                log_join(finished);
            }
        }
    }

    while let Some(finished) = in_flight.join_next().await {
        log_join(finished);
    }

    tracing::info!("Cooking job worker stopped");
}

fn log_join(finished: Result<(), JoinError>) {
    if let Err(e) = finished {
        tracing::error!("Cooking job task aborted: {}", e);
    }
}

/// Queue that only records what it is given
///
/// Nothing runs. Useful for tests and for dry runs of the HTTP surface.
#[derive(Clone, Default)]
pub struct RecordingJobQueue {
    jobs: Arc<Mutex<Vec<CookingJob>>>,
}

impl RecordingJobQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs enqueued so far, oldest first
    pub fn jobs(&self) -> Vec<CookingJob> {
        self.jobs.lock().map(|jobs| jobs.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().map(|jobs| jobs.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl JobQueue for RecordingJobQueue {
    async fn enqueue(&self, job: CookingJob) -> Result<()> {
        self.jobs
            .lock()
            .map_err(|e| anyhow!("Failed to acquire job list lock: {}", e))?
            .push(job);
        Ok(())
    }
}
