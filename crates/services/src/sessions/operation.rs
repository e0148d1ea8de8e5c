use std::fmt;

use backend::{ApiError, InterviewApi};
use career_core::model::{AnswerOptionId, Question, QuestionId, SessionId, TestResult};
use tracing::debug;

/// Session epoch. Bumped on every start and reset so late responses can be told apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub(crate) fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Identity of one network action of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Fetch the question list and open a session.
    Start,
    /// Persist the answer recorded for question `index`.
    Submit {
        session_id: SessionId,
        index: usize,
        question_id: QuestionId,
        answer_id: AnswerOptionId,
    },
    /// Close the session and fetch the aggregate result.
    Complete { session_id: SessionId },
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Start => f.write_str("start"),
            Operation::Submit {
                index, question_id, ..
            } => write!(f, "submit #{index} ({question_id})"),
            Operation::Complete { session_id } => write!(f, "complete {session_id}"),
        }
    }
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationSuccess {
    Started {
        session_id: SessionId,
        questions: Vec<Question>,
    },
    Submitted,
    Completed(TestResult),
}

/// Everything the machine needs to apply the result of a dispatched operation.
#[derive(Debug)]
pub struct OperationOutcome {
    pub generation: Generation,
    pub operation: Operation,
    pub result: Result<OperationSuccess, ApiError>,
}

/// A network action bound to the session generation that issued it.
///
/// Holding on to the value is enough to run it again later; no context needs
/// to be re-derived.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryableOperation {
    generation: Generation,
    operation: Operation,
}

impl RetryableOperation {
    pub(crate) fn new(generation: Generation, operation: Operation) -> Self {
        Self {
            generation,
            operation,
        }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// Execute against the backend. Failures are captured in the outcome.
    pub async fn run(&self, api: &dyn InterviewApi) -> OperationOutcome {
        debug!(operation = %self.operation, generation = self.generation.value(), "dispatching");
        let result = match &self.operation {
            Operation::Start => {
                futures::try_join!(api.fetch_questions(), api.open_session()).map(
                    |(questions, session_id)| OperationSuccess::Started {
                        session_id,
                        questions,
                    },
                )
            }
            Operation::Submit {
                session_id,
                question_id,
                answer_id,
                ..
            } => api
                .submit_answer(session_id, question_id, answer_id)
                .await
                .map(|()| OperationSuccess::Submitted),
            Operation::Complete { session_id } => api
                .complete_session(session_id)
                .await
                .map(OperationSuccess::Completed),
        };

        OperationOutcome {
            generation: self.generation,
            operation: self.operation.clone(),
            result,
        }
    }
}
