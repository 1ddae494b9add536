//! Cancellable polling for long-running generation jobs.
//!
//! Generation runs out of process; the panel pumps an owned [`JobPoll`]
//! handle instead of holding timers tied to component lifetime. Cancelling
//! just stops re-arming the loop, and a response that lands afterwards is
//! dropped rather than applied to history.

use crate::artifact::ArtifactVersion;
use crate::transform::{BoxFuture, TransformRequest};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a generation job.
pub type JobId = Uuid;

/// Default delay between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(750);

/// Reported state of a generation job.
#[derive(Debug, Clone)]
pub enum JobStatus {
    Queued,
    Running,
    Complete(ArtifactVersion),
    Failed(String),
}

/// A service running generation jobs out of process.
pub trait JobService: Send + Sync {
    /// Queue a new job; resolves to its id.
    fn submit(&self, request: &TransformRequest) -> BoxFuture<'_, JobId>;

    /// Report the current status of a job.
    fn status(&self, job: JobId) -> BoxFuture<'_, JobStatus>;
}

/// Outcome of feeding one observed status into the poll loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Job still in flight; the loop re-armed for the next tick.
    Pending,
    Done(ArtifactVersion),
    Failed(String),
    /// The handle was cancelled or already settled; the response is
    /// dropped.
    Ignored,
}

/// Owned handle for one polling loop.
#[derive(Debug, Clone)]
pub struct JobPoll {
    job_id: JobId,
    interval: Duration,
    last_poll: Option<Instant>,
    cancelled: bool,
    settled: bool,
}

impl JobPoll {
    /// Start polling a job with the default interval.
    pub fn start(job_id: JobId) -> Self {
        Self {
            job_id,
            interval: DEFAULT_POLL_INTERVAL,
            last_poll: None,
            cancelled: false,
            settled: false,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Whether the loop is still waiting on the job.
    pub fn is_armed(&self) -> bool {
        !self.cancelled && !self.settled
    }

    /// Whether the next status request should be issued now.
    pub fn due(&self) -> bool {
        if !self.is_armed() {
            return false;
        }
        match self.last_poll {
            Some(last) => last.elapsed() >= self.interval,
            None => true,
        }
    }

    /// Record that a status request was issued.
    pub fn mark_polled(&mut self) {
        self.last_poll = Some(Instant::now());
    }

    /// Feed an observed status into the loop.
    pub fn observe(&mut self, status: JobStatus) -> PollOutcome {
        if !self.is_armed() {
            log::debug!("dropping late status for job {}", self.job_id);
            return PollOutcome::Ignored;
        }
        match status {
            JobStatus::Queued | JobStatus::Running => PollOutcome::Pending,
            JobStatus::Complete(version) => {
                self.settled = true;
                PollOutcome::Done(version)
            }
            JobStatus::Failed(message) => {
                self.settled = true;
                PollOutcome::Failed(message)
            }
        }
    }

    /// Stop polling. The in-flight handle is discarded by never re-arming;
    /// any status observed afterwards is ignored.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version() -> ArtifactVersion {
        ArtifactVersion::new(vec![1], "image/x-raw")
    }

    fn poll() -> JobPoll {
        JobPoll::start(Uuid::new_v4()).with_interval(Duration::ZERO)
    }

    #[test]
    fn test_poll_flow_to_completion() {
        let mut poll = poll();
        assert!(poll.due());

        poll.mark_polled();
        assert_eq!(poll.observe(JobStatus::Queued), PollOutcome::Pending);
        assert!(poll.due()); // zero interval re-arms immediately

        poll.mark_polled();
        assert_eq!(poll.observe(JobStatus::Running), PollOutcome::Pending);

        let produced = version();
        let outcome = poll.observe(JobStatus::Complete(produced.clone()));
        assert_eq!(outcome, PollOutcome::Done(produced));
        assert!(poll.is_settled());
        assert!(!poll.due());
    }

    #[test]
    fn test_failure_settles_the_loop() {
        let mut poll = poll();
        let outcome = poll.observe(JobStatus::Failed("out of credits".into()));
        assert_eq!(outcome, PollOutcome::Failed("out of credits".into()));
        assert!(!poll.due());
    }

    #[test]
    fn test_cancel_stops_rearming() {
        let mut poll = poll();
        poll.mark_polled();
        assert_eq!(poll.observe(JobStatus::Running), PollOutcome::Pending);

        poll.cancel();
        assert!(!poll.due());
        assert!(poll.is_cancelled());
    }

    #[test]
    fn test_late_response_after_cancel_is_dropped() {
        let mut poll = poll();
        poll.cancel();

        let outcome = poll.observe(JobStatus::Complete(version()));
        assert_eq!(outcome, PollOutcome::Ignored);
        assert!(!poll.is_settled());
    }

    #[test]
    fn test_response_after_settle_is_dropped() {
        let mut poll = poll();
        poll.observe(JobStatus::Complete(version()));

        let outcome = poll.observe(JobStatus::Complete(version()));
        assert_eq!(outcome, PollOutcome::Ignored);
    }

    #[test]
    fn test_interval_gates_due() {
        let mut poll = JobPoll::start(Uuid::new_v4()).with_interval(Duration::from_secs(3600));
        assert!(poll.due()); // never polled yet

        poll.mark_polled();
        assert!(!poll.due());
    }
}
