use std::fmt;

use career_core::model::QuestionId;

/// Operation an error descriptor tells the caller to re-invoke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RetryAction {
    Start,
    Submit,
    Complete,
    Restart,
}

impl fmt::Display for RetryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RetryAction::Start => "start",
            RetryAction::Submit => "submit",
            RetryAction::Complete => "complete",
            RetryAction::Restart => "restart",
        };
        f.write_str(label)
    }
}

/// Why an operation failed, as far as the user needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FailureCause {
    /// The backend could not be reached.
    Unreachable,
    /// The backend no longer knows the session (404).
    SessionNotFound,
    /// The session was already completed (409).
    SessionClosed,
    /// The backend rejected the session data as invalid or incomplete (422).
    InvalidSession,
    /// Too many sessions or requests (429).
    RateLimited,
    /// 5xx response.
    ServerError(u16),
    /// The backend returned no questions.
    EmptyQuestionnaire,
    /// Local state does not allow the operation to continue.
    InconsistentState(String),
    /// Timeouts, undecodable responses and anything else.
    Unknown,
}

/// User-facing description of a failed operation.
///
/// Each variant names the one operation that recovers from it and carries
/// only what that operation needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorDescriptor {
    Start {
        cause: FailureCause,
    },
    Submit {
        index: usize,
        question_id: QuestionId,
        cause: FailureCause,
    },
    Complete {
        cause: FailureCause,
    },
    Restart {
        cause: FailureCause,
    },
}

impl ErrorDescriptor {
    #[must_use]
    pub fn retry_action(&self) -> RetryAction {
        match self {
            ErrorDescriptor::Start { .. } => RetryAction::Start,
            ErrorDescriptor::Submit { .. } => RetryAction::Submit,
            ErrorDescriptor::Complete { .. } => RetryAction::Complete,
            ErrorDescriptor::Restart { .. } => RetryAction::Restart,
        }
    }

    #[must_use]
    pub fn cause(&self) -> &FailureCause {
        match self {
            ErrorDescriptor::Start { cause }
            | ErrorDescriptor::Submit { cause, .. }
            | ErrorDescriptor::Complete { cause }
            | ErrorDescriptor::Restart { cause } => cause,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        match self {
            ErrorDescriptor::Start { .. } => "Could not start the test",
            ErrorDescriptor::Submit { .. } => "Your answer was not saved",
            ErrorDescriptor::Complete { .. } => "Could not load your results",
            ErrorDescriptor::Restart { .. } => "The test needs to be restarted",
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        let detail = match self.cause() {
            FailureCause::Unreachable => "The server is unreachable. Check your connection.",
            FailureCause::SessionNotFound => "The test session has expired.",
            FailureCause::SessionClosed => "This test session is already finished.",
            FailureCause::InvalidSession => "The server rejected the session data.",
            FailureCause::RateLimited => "Too many attempts right now. Wait a minute.",
            FailureCause::ServerError(_) => "The server had a problem.",
            FailureCause::EmptyQuestionnaire => "No questions are available yet.",
            FailureCause::InconsistentState(_) => "Something went wrong with this test.",
            FailureCause::Unknown => "Something went wrong.",
        };
        let hint = match self.retry_action() {
            RetryAction::Start => "Try starting again.",
            RetryAction::Submit => "Your answer is kept; try sending it again.",
            RetryAction::Complete => "Your answers are saved; try loading results again.",
            RetryAction::Restart => "Please start over.",
        };
        format!("{detail} {hint}")
    }
}

impl fmt::Display for ErrorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variant_names_its_action() {
        let cases = [
            (
                ErrorDescriptor::Start {
                    cause: FailureCause::Unknown,
                },
                RetryAction::Start,
            ),
            (
                ErrorDescriptor::Submit {
                    index: 2,
                    question_id: QuestionId::new("q3"),
                    cause: FailureCause::Unknown,
                },
                RetryAction::Submit,
            ),
            (
                ErrorDescriptor::Complete {
                    cause: FailureCause::Unknown,
                },
                RetryAction::Complete,
            ),
            (
                ErrorDescriptor::Restart {
                    cause: FailureCause::Unknown,
                },
                RetryAction::Restart,
            ),
        ];
        for (descriptor, action) in cases {
            assert_eq!(descriptor.retry_action(), action);
        }
    }

    #[test]
    fn submit_message_reassures_answer_is_kept() {
        let descriptor = ErrorDescriptor::Submit {
            index: 0,
            question_id: QuestionId::new("q1"),
            cause: FailureCause::Unreachable,
        };
        let message = descriptor.message();
        assert!(message.contains("unreachable"));
        assert!(message.contains("answer is kept"));
    }
}
