use async_trait::async_trait;
use mockall::automock;
use std::time::Duration;
use tokio::time::{Instant, interval};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::domain::analysis::AnalysisJobStatus;
use crate::services::http::ApiError;

/// Source of job status checks - allows for mocking in tests.
#[automock]
#[async_trait]
pub trait StatusProvider: Send + Sync {
    async fn job_status(&self, job_id: &str) -> Result<AnalysisJobStatus, ApiError>;
}

/// Drives the one long-running backend operation by polling its status on a
/// fixed interval until it reaches a terminal state or the wall-clock cap
/// elapses. Cancellation is dropping the returned future; no server-side
/// cancellation request exists (the backend job keeps running).
pub struct JobPoller {
    interval: Duration,
    timeout: Duration,
}

impl JobPoller {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            interval: config.poll_interval,
            timeout: config.poll_timeout,
        }
    }

    pub fn with_timing(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    /// Polls until a terminal status or timeout. Non-terminal statuses are
    /// passed to `on_progress`; transient status-check failures are logged
    /// and skipped (the timeout still bounds the loop).
    pub async fn wait_for_terminal(
        &self,
        provider: &dyn StatusProvider,
        job_id: &str,
        mut on_progress: impl FnMut(&AnalysisJobStatus),
    ) -> Result<AnalysisJobStatus, ApiError> {
        let deadline = Instant::now() + self.timeout;
        let mut ticker = interval(self.interval);

        loop {
            ticker.tick().await;

            if Instant::now() >= deadline {
                warn!(job_id = %job_id, timeout = ?self.timeout, "Analysis polling timed out");
                return Err(ApiError::PollTimeout(self.timeout));
            }

            match provider.job_status(job_id).await {
                Ok(status) if status.status.is_terminal() => {
                    debug!(job_id = %job_id, status = ?status.status, "Job reached terminal status");
                    return Ok(status);
                }
                Ok(status) => {
                    debug!(
                        job_id = %job_id,
                        status = ?status.status,
                        progress = status.progress_percentage,
                        "Job still in progress"
                    );
                    on_progress(&status);
                }
                Err(e) => {
                    warn!(job_id = %job_id, error = %e, "Status check failed, will retry on next tick");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::JobStatus;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    fn status(job_id: &str, status: JobStatus) -> AnalysisJobStatus {
        AnalysisJobStatus {
            job_id: job_id.to_string(),
            status,
            progress_percentage: 0.0,
            completed_queries: 0,
            total_queries: 0,
            error: None,
        }
    }

    fn sequenced_provider(sequence: Vec<JobStatus>) -> MockStatusProvider {
        let queue = Arc::new(Mutex::new(VecDeque::from(sequence)));
        let mut provider = MockStatusProvider::new();
        provider.expect_job_status().returning(move |job_id| {
            let next = queue
                .lock()
                .unwrap()
                .pop_front()
                .expect("polled more often than the sequence allows");
            Ok(status(job_id, next))
        });
        provider
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolves_after_exactly_three_polls() {
        let calls = Arc::new(Mutex::new(0usize));
        let queue = Arc::new(Mutex::new(VecDeque::from(vec![
            JobStatus::Pending,
            JobStatus::Running,
            JobStatus::Completed,
        ])));
        let mut provider = MockStatusProvider::new();
        {
            let calls = calls.clone();
            provider.expect_job_status().returning(move |job_id| {
                *calls.lock().unwrap() += 1;
                let next = queue.lock().unwrap().pop_front().unwrap();
                Ok(status(job_id, next))
            });
        }

        let poller =
            JobPoller::with_timing(Duration::from_secs(3), Duration::from_secs(600));
        let mut progress_seen = Vec::new();
        let result = poller
            .wait_for_terminal(&provider, "job-1", |s| progress_seen.push(s.status))
            .await
            .unwrap();

        assert_eq!(result.status, JobStatus::Completed);
        assert_eq!(*calls.lock().unwrap(), 3);
        assert_eq!(progress_seen, vec![JobStatus::Pending, JobStatus::Running]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_failure_is_terminal() {
        let provider = sequenced_provider(vec![JobStatus::Running, JobStatus::PartialFailure]);
        let poller =
            JobPoller::with_timing(Duration::from_secs(3), Duration::from_secs(600));
        let result = poller
            .wait_for_terminal(&provider, "job-2", |_| {})
            .await
            .unwrap();
        assert_eq!(result.status, JobStatus::PartialFailure);
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_without_terminal_status() {
        let mut provider = MockStatusProvider::new();
        provider
            .expect_job_status()
            .returning(|job_id| Ok(status(job_id, JobStatus::Running)));

        let poller =
            JobPoller::with_timing(Duration::from_secs(3), Duration::from_secs(600));
        let result = poller.wait_for_terminal(&provider, "job-3", |_| {}).await;

        match result {
            Err(ApiError::PollTimeout(timeout)) => {
                assert_eq!(timeout, Duration::from_secs(600));
            }
            other => panic!("expected poll timeout, got {:?}", other.map(|s| s.status)),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_the_poll_future_cancels() {
        let mut provider = MockStatusProvider::new();
        provider
            .expect_job_status()
            .returning(|job_id| Ok(status(job_id, JobStatus::Running)));

        let poller =
            JobPoller::with_timing(Duration::from_secs(3), Duration::from_secs(600));
        let poll = poller.wait_for_terminal(&provider, "job-5", |_| {});
        tokio::pin!(poll);

        // The poll loses the race against a shorter sleep and is dropped,
        // which is the cancellation mechanism.
        let finished = tokio::select! {
            _ = &mut poll => true,
            _ = tokio::time::sleep(Duration::from_secs(10)) => false,
        };
        assert!(!finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_error_does_not_abort() {
        let queue = Arc::new(Mutex::new(VecDeque::from(vec![
            None,
            Some(JobStatus::Running),
            Some(JobStatus::Completed),
        ])));
        let mut provider = MockStatusProvider::new();
        provider.expect_job_status().returning(move |job_id| {
            match queue.lock().unwrap().pop_front().unwrap() {
                Some(next) => Ok(status(job_id, next)),
                None => Err(ApiError::Backend {
                    status: 503,
                    detail: "temporarily unavailable".to_string(),
                }),
            }
        });

        let poller =
            JobPoller::with_timing(Duration::from_secs(3), Duration::from_secs(600));
        let result = poller
            .wait_for_terminal(&provider, "job-4", |_| {})
            .await
            .unwrap();
        assert_eq!(result.status, JobStatus::Completed);
    }
}
