//! Completion strategies: how a job relates to the HTTP response.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use pipeline::{ExecutionMode, JobId};
use tracing::{error, info, info_span, warn, Instrument};

/// One unit of pipeline work (generate + notify).
pub type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// What the HTTP layer tells the webhook sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgement {
    /// The job ran to completion before returning.
    Processed,
    /// The job continues in the background.
    Accepted,
}

impl Acknowledgement {
    /// Response body text.
    pub fn message(self) -> &'static str {
        match self {
            Acknowledgement::Processed => "OK (AWS Processed)",
            Acknowledgement::Accepted => "OK (Local Background)",
        }
    }
}

/// Decides whether a job finishes before or after the response.
#[async_trait]
pub trait CompletionStrategy: Send + Sync {
    async fn run(&self, job_id: JobId, job: Job) -> Acknowledgement;
}

/// Runs the job inline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSync;

#[async_trait]
impl CompletionStrategy for RunSync {
    async fn run(&self, job_id: JobId, job: Job) -> Acknowledgement {
        job.instrument(info_span!("job", %job_id, mode = "sync")).await;
        info!(%job_id, "Job finished");
        Acknowledgement::Processed
    }
}

/// Spawns the job on the runtime and returns at once.
///
/// A supervisor task awaits the job's handle and logs how it ended, so a
/// panicking job is reported instead of vanishing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunDetached;

#[async_trait]
impl CompletionStrategy for RunDetached {
    async fn run(&self, job_id: JobId, job: Job) -> Acknowledgement {
        let handle = tokio::spawn(job.instrument(info_span!("job", %job_id, mode = "detached")));

        tokio::spawn(async move {
            match handle.await {
                Ok(()) => info!(%job_id, "Background job finished"),
                Err(e) if e.is_panic() => error!(%job_id, error = %e, "Background job panicked"),
                Err(e) => warn!(%job_id, error = %e, "Background job cancelled"),
            }
        });

        Acknowledgement::Accepted
    }
}

/// The strategy for `mode`.
pub fn strategy_for(mode: ExecutionMode) -> Arc<dyn CompletionStrategy> {
    match mode {
        ExecutionMode::Synchronous => Arc::new(RunSync),
        ExecutionMode::Detached => Arc::new(RunDetached),
    }
}

#[cfg(test)]
#[path = "strategy_tests.rs"]
mod tests;
