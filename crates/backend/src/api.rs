use std::sync::Arc;

use async_trait::async_trait;
use career_core::model::{
    AnswerOptionId, Question, QuestionId, RoleId, RoleProfile, SessionId, StageDetail, StageId,
    TestResult,
};

use crate::config::BackendConfig;
use crate::error::ApiError;
use crate::http::HttpBackend;
use crate::memory::InMemoryBackend;

/// Backend contract for running a test session.
#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// Fetch the ordered question list.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError>;

    /// Open a new session and return its backend-issued id.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    async fn open_session(&self) -> Result<SessionId, ApiError>;

    /// Persist one answer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend rejects the answer or is unreachable.
    async fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        answer_id: &AnswerOptionId,
    ) -> Result<(), ApiError>;

    /// Close the session and fetch the aggregate result.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    async fn complete_session(&self, session_id: &SessionId) -> Result<TestResult, ApiError>;
}

/// Backend contract for guide reference data.
#[async_trait]
pub trait GuideApi: Send + Sync {
    /// Fetch one backend stage together with its roles.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    async fn fetch_stage_detail(&self, stage_id: &StageId) -> Result<StageDetail, ApiError>;

    /// Fetch a single role profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body cannot be decoded.
    async fn fetch_role_profile(&self, role_id: &RoleId) -> Result<RoleProfile, ApiError>;
}

/// Bundles the backend contracts behind trait objects for easy swapping.
#[derive(Clone)]
pub struct Backend {
    pub interview: Arc<dyn InterviewApi>,
    pub guide: Arc<dyn GuideApi>,
}

impl Backend {
    /// Build an HTTP-backed bundle.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be constructed.
    pub fn http(config: BackendConfig) -> Result<Self, ApiError> {
        let client = Arc::new(HttpBackend::new(config)?);
        let interview: Arc<dyn InterviewApi> = client.clone();
        let guide: Arc<dyn GuideApi> = client;
        Ok(Self { interview, guide })
    }

    #[must_use]
    pub fn in_memory(backend: InMemoryBackend) -> Self {
        let shared = Arc::new(backend);
        let interview: Arc<dyn InterviewApi> = shared.clone();
        let guide: Arc<dyn GuideApi> = shared;
        Self { interview, guide }
    }
}
