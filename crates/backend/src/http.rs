use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use career_core::model::{
    AnswerOptionId, Question, QuestionId, RoleId, RoleProfile, SessionId, StageDetail, StageId,
    TestResult,
};

use crate::api::{GuideApi, InterviewApi};
use crate::config::BackendConfig;
use crate::error::ApiError;

/// `reqwest`-based client for the career backend.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    config: BackendConfig,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the client cannot be built.
    pub fn new(config: BackendConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.get(self.config.endpoint(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorize(self.client.post(self.config.endpoint(path)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(%status, url = %response.url(), "backend response");
        if !status.is_success() {
            return Err(ApiError::HttpStatus(status));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        decode(&bytes)
    }
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| ApiError::Decode(err.to_string()))
}

#[derive(Debug, Deserialize)]
struct StartResponse {
    session_id: SessionId,
}

#[derive(Debug, Serialize)]
struct SubmitAnswerRequest<'a> {
    question_id: &'a QuestionId,
    answer_option_id: &'a AnswerOptionId,
}

#[async_trait]
impl InterviewApi for HttpBackend {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.send_json(self.get("interview/questions")).await
    }

    async fn open_session(&self) -> Result<SessionId, ApiError> {
        let body: StartResponse = self.send_json(self.post("interview/start")).await?;
        Ok(body.session_id)
    }

    async fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        answer_id: &AnswerOptionId,
    ) -> Result<(), ApiError> {
        let payload = SubmitAnswerRequest {
            question_id,
            answer_option_id: answer_id,
        };
        self.send(
            self.post(&format!("interview/answer/{session_id}"))
                .json(&payload),
        )
        .await?;
        Ok(())
    }

    async fn complete_session(&self, session_id: &SessionId) -> Result<TestResult, ApiError> {
        self.send_json(self.post(&format!("interview/complete/{session_id}")))
            .await
    }
}

#[async_trait]
impl GuideApi for HttpBackend {
    async fn fetch_stage_detail(&self, stage_id: &StageId) -> Result<StageDetail, ApiError> {
        self.send_json(self.get(&format!("interview/stages/{stage_id}")))
            .await
    }

    async fn fetch_role_profile(&self, role_id: &RoleId) -> Result<RoleProfile, ApiError> {
        self.send_json(self.get(&format!("interview/roles/{role_id}")))
            .await
    }
}
