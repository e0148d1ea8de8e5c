use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use career_core::model::{
    AnswerOptionId, Question, QuestionId, RoleId, RoleProfile, SessionId, StageDetail, StageId,
    TestResult,
};

use crate::api::{GuideApi, InterviewApi};
use crate::error::ApiError;

/// Places where a scripted failure can be injected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FailPoint {
    Questions,
    OpenSession,
    Submit,
    Complete,
    Stage(StageId),
    Profile(RoleId),
}

/// One call observed by the in-memory backend, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    FetchQuestions,
    OpenSession,
    Submit {
        session_id: SessionId,
        question_id: QuestionId,
        answer_id: AnswerOptionId,
    },
    Complete {
        session_id: SessionId,
    },
    Stage(StageId),
    Profile(RoleId),
}

#[derive(Default)]
struct State {
    questions: Vec<Question>,
    result: Option<TestResult>,
    stages: HashMap<StageId, StageDetail>,
    profiles: HashMap<RoleId, RoleProfile>,
    stage_delays: HashMap<StageId, Duration>,
    fail_once: Vec<FailPoint>,
    fail_always: HashSet<FailPoint>,
    calls: Vec<BackendCall>,
    sessions_opened: u64,
}

impl State {
    /// Consume a one-shot failure or match a persistent one.
    fn should_fail(&mut self, point: &FailPoint) -> bool {
        if let Some(pos) = self.fail_once.iter().position(|p| p == point) {
            self.fail_once.remove(pos);
            return true;
        }
        self.fail_always.contains(point)
    }
}

fn injected(point: &FailPoint) -> ApiError {
    ApiError::Connection(format!("injected failure at {point:?}"))
}

/// Scripted backend for tests and offline prototyping.
///
/// Clones share state, so a test can keep a handle while services own another.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    state: Arc<Mutex<State>>,
}

impl InMemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, ApiError> {
        self.state
            .lock()
            .map_err(|e| ApiError::Connection(e.to_string()))
    }

    fn with_state(self, f: impl FnOnce(&mut State)) -> Self {
        if let Ok(mut guard) = self.state.lock() {
            f(&mut guard);
        }
        self
    }

    #[must_use]
    pub fn with_questions(self, questions: Vec<Question>) -> Self {
        self.with_state(|s| s.questions = questions)
    }

    /// Result returned by `complete_session`; its session id is replaced by the caller's.
    #[must_use]
    pub fn with_result(self, result: TestResult) -> Self {
        self.with_state(|s| s.result = Some(result))
    }

    #[must_use]
    pub fn with_stage(self, detail: StageDetail) -> Self {
        self.with_state(|s| {
            s.stages.insert(detail.stage.id.clone(), detail);
        })
    }

    #[must_use]
    pub fn with_profile(self, profile: RoleProfile) -> Self {
        self.with_state(|s| {
            s.profiles.insert(profile.id.clone(), profile);
        })
    }

    /// Delay responses for one stage, to reorder concurrent completions.
    #[must_use]
    pub fn with_stage_delay(self, stage_id: StageId, delay: Duration) -> Self {
        self.with_state(|s| {
            s.stage_delays.insert(stage_id, delay);
        })
    }

    /// Fail the next call at `point`, then behave normally again.
    pub fn fail_next(&self, point: FailPoint) {
        if let Ok(mut guard) = self.state.lock() {
            guard.fail_once.push(point);
        }
    }

    /// Fail every call at `point` until [`InMemoryBackend::recover`] is called.
    pub fn fail_always(&self, point: FailPoint) {
        if let Ok(mut guard) = self.state.lock() {
            guard.fail_always.insert(point);
        }
    }

    pub fn recover(&self, point: &FailPoint) {
        if let Ok(mut guard) = self.state.lock() {
            guard.fail_always.remove(point);
            guard.fail_once.retain(|p| p != point);
        }
    }

    /// Every call received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state
            .lock()
            .map(|guard| guard.calls.clone())
            .unwrap_or_default()
    }

    /// Only the submit calls, in order.
    #[must_use]
    pub fn submissions(&self) -> Vec<BackendCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, BackendCall::Submit { .. }))
            .collect()
    }

    pub fn clear_calls(&self) {
        if let Ok(mut guard) = self.state.lock() {
            guard.calls.clear();
        }
    }
}

#[async_trait]
impl InterviewApi for InMemoryBackend {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        let mut state = self.lock()?;
        state.calls.push(BackendCall::FetchQuestions);
        if state.should_fail(&FailPoint::Questions) {
            return Err(injected(&FailPoint::Questions));
        }
        Ok(state.questions.clone())
    }

    async fn open_session(&self) -> Result<SessionId, ApiError> {
        let mut state = self.lock()?;
        state.calls.push(BackendCall::OpenSession);
        if state.should_fail(&FailPoint::OpenSession) {
            return Err(injected(&FailPoint::OpenSession));
        }
        state.sessions_opened += 1;
        Ok(SessionId::new(format!("session-{}", state.sessions_opened)))
    }

    async fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        answer_id: &AnswerOptionId,
    ) -> Result<(), ApiError> {
        let mut state = self.lock()?;
        state.calls.push(BackendCall::Submit {
            session_id: session_id.clone(),
            question_id: question_id.clone(),
            answer_id: answer_id.clone(),
        });
        if state.should_fail(&FailPoint::Submit) {
            return Err(injected(&FailPoint::Submit));
        }
        if !state.questions.iter().any(|q| &q.id == question_id) {
            return Err(ApiError::HttpStatus(StatusCode::UNPROCESSABLE_ENTITY));
        }
        Ok(())
    }

    async fn complete_session(&self, session_id: &SessionId) -> Result<TestResult, ApiError> {
        let mut state = self.lock()?;
        state.calls.push(BackendCall::Complete {
            session_id: session_id.clone(),
        });
        if state.should_fail(&FailPoint::Complete) {
            return Err(injected(&FailPoint::Complete));
        }
        let mut result = state
            .result
            .clone()
            .ok_or(ApiError::HttpStatus(StatusCode::UNPROCESSABLE_ENTITY))?;
        result.session_id = session_id.clone();
        Ok(result)
    }
}

#[async_trait]
impl GuideApi for InMemoryBackend {
    async fn fetch_stage_detail(&self, stage_id: &StageId) -> Result<StageDetail, ApiError> {
        let delay = {
            let mut state = self.lock()?;
            state.calls.push(BackendCall::Stage(stage_id.clone()));
            state.stage_delays.get(stage_id).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock()?;
        let point = FailPoint::Stage(stage_id.clone());
        if state.should_fail(&point) {
            return Err(injected(&point));
        }
        state
            .stages
            .get(stage_id)
            .cloned()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn fetch_role_profile(&self, role_id: &RoleId) -> Result<RoleProfile, ApiError> {
        let mut state = self.lock()?;
        state.calls.push(BackendCall::Profile(role_id.clone()));
        let point = FailPoint::Profile(role_id.clone());
        if state.should_fail(&point) {
            return Err(injected(&point));
        }
        state
            .profiles
            .get(role_id)
            .cloned()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_core::model::AnswerOption;

    fn question(id: &str) -> Question {
        Question {
            id: QuestionId::new(id),
            text: format!("Question {id}"),
            thematic_block: "block".into(),
            kind: None,
            answer_options: vec![AnswerOption {
                id: AnswerOptionId::new("a"),
                text: "A".into(),
            }],
        }
    }

    #[tokio::test]
    async fn one_shot_failure_then_recovers() {
        let backend = InMemoryBackend::new().with_questions(vec![question("q1")]);
        backend.fail_next(FailPoint::Submit);
        let session = backend.open_session().await.unwrap();

        let first = backend
            .submit_answer(&session, &QuestionId::new("q1"), &AnswerOptionId::new("a"))
            .await;
        let second = backend
            .submit_answer(&session, &QuestionId::new("q1"), &AnswerOptionId::new("a"))
            .await;

        assert!(matches!(first, Err(ApiError::Connection(_))));
        assert!(second.is_ok());
        assert_eq!(backend.submissions().len(), 2);
    }

    #[tokio::test]
    async fn sessions_get_distinct_ids() {
        let backend = InMemoryBackend::new();
        let a = backend.open_session().await.unwrap();
        let b = backend.open_session().await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn persistent_failure_until_recover() {
        let backend = InMemoryBackend::new();
        backend.fail_always(FailPoint::Questions);
        assert!(backend.fetch_questions().await.is_err());
        assert!(backend.fetch_questions().await.is_err());
        backend.recover(&FailPoint::Questions);
        assert!(backend.fetch_questions().await.is_ok());
    }

    #[tokio::test]
    async fn unknown_stage_is_not_found() {
        let backend = InMemoryBackend::new();
        let err = backend
            .fetch_stage_detail(&StageId::new("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(backend.calls(), vec![BackendCall::Stage(StageId::new("missing"))]);
    }
}
