//! Image generation panel: prompt in, polled job out.

use brightroom_core::jobs::DEFAULT_POLL_INTERVAL;
use brightroom_core::{
    ArtifactVersion, EditHistory, JobId, JobPoll, JobService, PollOutcome, TransformRequest,
};
use std::time::Duration;

/// The image generation panel.
///
/// Generation requests run as jobs on the service; the panel owns at most
/// one [`JobPoll`] handle and pumps it from the host's frame loop. Results
/// land in the same edit history contract the other panels use.
pub struct GeneratorPanel<S> {
    service: S,
    history: EditHistory<ArtifactVersion>,
    poll: Option<JobPoll>,
    poll_interval: Duration,
    last_error: Option<String>,
}

impl<S: JobService> GeneratorPanel<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            history: EditHistory::new(),
            poll: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            last_error: None,
        }
    }

    pub fn set_poll_interval(&mut self, interval: Duration) {
        self.poll_interval = interval;
    }

    pub fn history(&self) -> &EditHistory<ArtifactVersion> {
        &self.history
    }

    pub fn current(&self) -> Option<&ArtifactVersion> {
        self.history.current()
    }

    pub fn undo(&mut self) -> Option<&ArtifactVersion> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Option<&ArtifactVersion> {
        self.history.redo()
    }

    pub fn is_generating(&self) -> bool {
        self.poll.as_ref().is_some_and(JobPoll::is_armed)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Submit a new prompt; any previous poll is abandoned.
    pub async fn generate(&mut self, prompt: &str) -> JobId {
        if let Some(poll) = &mut self.poll {
            poll.cancel();
        }
        let request = TransformRequest::prompt(prompt);
        let id = self.service.submit(&request).await;
        self.poll = Some(JobPoll::start(id).with_interval(self.poll_interval));
        self.last_error = None;
        id
    }

    /// Pump the poll loop once. Returns the new version when the job
    /// lands; a loop that is idle, not yet due, or cancelled does nothing.
    pub async fn tick(&mut self) -> Option<ArtifactVersion> {
        let job_id = {
            let poll = self.poll.as_mut()?;
            if !poll.due() {
                return None;
            }
            poll.mark_polled();
            poll.job_id()
        };
        let status = self.service.status(job_id).await;

        let poll = self.poll.as_mut()?;
        match poll.observe(status) {
            PollOutcome::Done(version) => {
                if self.history.seed(version.clone()).is_err() {
                    self.history.push(version.clone());
                }
                Some(version)
            }
            PollOutcome::Failed(message) => {
                log::warn!("generation failed: {message}");
                self.last_error = Some(message);
                None
            }
            PollOutcome::Pending | PollOutcome::Ignored => None,
        }
    }

    /// Stop waiting for the current job. A result that arrives later is
    /// dropped instead of applied to history.
    pub fn cancel_generation(&mut self) {
        if let Some(poll) = &mut self.poll {
            poll.cancel();
        }
    }
}
