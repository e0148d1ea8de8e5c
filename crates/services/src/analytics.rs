//! Best-effort product analytics for test sessions.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use career_core::model::{RoleId, SessionId, StageId};
use serde::Serialize;
use tracing::info;

use crate::error::AnalyticsError;
use crate::sessions::SessionEvent;

/// Event emitted at a session milestone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event")]
pub enum AnalyticsEvent {
    #[serde(rename = "career_test_start")]
    TestStarted {
        session_id: SessionId,
        question_count: usize,
        timestamp: DateTime<Utc>,
    },
    #[serde(rename = "career_test_complete")]
    TestCompleted {
        session_id: SessionId,
        role_count: usize,
        primary_role_id: Option<RoleId>,
        primary_stage_id: Option<StageId>,
        timestamp: DateTime<Utc>,
    },
}

impl AnalyticsEvent {
    #[must_use]
    pub fn from_session(event: &SessionEvent, timestamp: DateTime<Utc>) -> Self {
        match event {
            SessionEvent::Started {
                session_id,
                question_count,
            } => Self::TestStarted {
                session_id: session_id.clone(),
                question_count: *question_count,
                timestamp,
            },
            SessionEvent::Completed {
                session_id,
                role_count,
                primary_role,
                primary_stage,
            } => Self::TestCompleted {
                session_id: session_id.clone(),
                role_count: *role_count,
                primary_role_id: primary_role.clone(),
                primary_stage_id: primary_stage.clone(),
                timestamp,
            },
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TestStarted { .. } => "career_test_start",
            Self::TestCompleted { .. } => "career_test_complete",
        }
    }

    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        match self {
            Self::TestStarted { session_id, .. } | Self::TestCompleted { session_id, .. } => {
                session_id
            }
        }
    }
}

/// Destination for analytics events.
pub trait AnalyticsSink: Send + Sync {
    /// Record one event.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError` if the event could not be recorded. Callers
    /// log and drop the error.
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Writes events to the `analytics` tracing target as JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let payload = serde_json::to_string(event)?;
        info!(target: "analytics", event = event.name(), %payload);
        Ok(())
    }
}

/// Keeps events in memory. Can be switched to reject everything.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
    rejecting: bool,
}

impl RecordingAnalytics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every `track` call fails.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            events: Mutex::default(),
            rejecting: true,
        }
    }

    #[must_use]
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(AnalyticsEvent::name).collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        if self.rejecting {
            return Err(AnalyticsError::Unavailable("sink rejects events".into()));
        }
        self.events
            .lock()
            .map_err(|_| AnalyticsError::Unavailable("event log poisoned".into()))?
            .push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_core::time::fixed_now;

    #[test]
    fn start_event_serializes_with_wire_name() {
        let event = AnalyticsEvent::from_session(
            &SessionEvent::Started {
                session_id: SessionId::new("s1"),
                question_count: 12,
            },
            fixed_now(),
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "career_test_start");
        assert_eq!(json["session_id"], "s1");
        assert_eq!(json["question_count"], 12);
        assert_eq!(json["timestamp"], "2023-11-14T22:13:20Z");
    }

    #[test]
    fn complete_event_carries_primary_ids() {
        let event = AnalyticsEvent::from_session(
            &SessionEvent::Completed {
                session_id: SessionId::new("s1"),
                role_count: 3,
                primary_role: Some(RoleId::new("ux_designer")),
                primary_stage: None,
            },
            fixed_now(),
        );

        assert_eq!(event.name(), "career_test_complete");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["primary_role_id"], "ux_designer");
        assert!(json["primary_stage_id"].is_null());
    }

    #[test]
    fn rejecting_sink_reports_error() {
        let sink = RecordingAnalytics::rejecting();
        let event = AnalyticsEvent::TestStarted {
            session_id: SessionId::new("s"),
            question_count: 1,
            timestamp: fixed_now(),
        };
        assert!(sink.track(&event).is_err());
        assert!(sink.events().is_empty());
    }
}
