use std::fmt;
use std::sync::Arc;

use backend::InterviewApi;
use career_core::model::AnswerOptionId;
use tracing::warn;

use crate::Clock;
use crate::analytics::{AnalyticsEvent, AnalyticsSink};

use super::guard::NavigationHost;
use super::machine::{SessionEvent, SessionMachine};
use super::operation::RetryableOperation;

/// Drives a `SessionMachine` against the backend.
///
/// Every operation and its follow-ups are awaited one after another, so
/// answers reach the backend strictly in question order.
pub struct SessionWorkflow {
    machine: SessionMachine,
    api: Arc<dyn InterviewApi>,
    analytics: Arc<dyn AnalyticsSink>,
    clock: Clock,
}

impl SessionWorkflow {
    #[must_use]
    pub fn new(
        api: Arc<dyn InterviewApi>,
        analytics: Arc<dyn AnalyticsSink>,
        navigation: Arc<dyn NavigationHost>,
        clock: Clock,
    ) -> Self {
        Self {
            machine: SessionMachine::new(navigation),
            api,
            analytics,
            clock,
        }
    }

    #[must_use]
    pub fn machine(&self) -> &SessionMachine {
        &self.machine
    }

    /// Fetch questions and open a session. Returns whether anything was dispatched.
    pub async fn start(&mut self) -> bool {
        let op = self.machine.start();
        self.drive(op).await
    }

    pub fn answer(&mut self, option_id: AnswerOptionId) -> bool {
        self.machine.answer(option_id)
    }

    /// Submit the current answer, completing the session after the last one.
    pub async fn advance(&mut self) -> bool {
        let op = self.machine.advance();
        self.drive(op).await
    }

    pub fn retreat(&mut self) -> bool {
        self.machine.retreat()
    }

    /// Re-run whatever the active error names.
    pub async fn retry(&mut self) -> bool {
        let op = self.machine.retry();
        self.drive(op).await
    }

    /// Abandon the session. An outcome still on its way is ignored.
    pub fn reset(&mut self) {
        self.machine.reset();
    }

    async fn drive(&mut self, first: Option<RetryableOperation>) -> bool {
        let dispatched = first.is_some();
        let mut pending = first;
        while let Some(op) = pending.take() {
            let outcome = op.run(self.api.as_ref()).await;
            let applied = self.machine.apply(outcome);
            if let Some(event) = applied.event {
                self.emit(&event);
            }
            pending = applied.next;
        }
        dispatched
    }

    fn emit(&self, event: &SessionEvent) {
        let event = AnalyticsEvent::from_session(event, self.clock.now());
        if let Err(err) = self.analytics.track(&event) {
            warn!(event = event.name(), error = %err, "failed to record analytics event");
        }
    }
}

impl fmt::Debug for SessionWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionWorkflow")
            .field("machine", &self.machine)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
