use backend::ApiError;

use super::descriptor::{ErrorDescriptor, FailureCause};
use super::operation::Operation;

/// Map a failed operation to the descriptor that names its retry.
#[must_use]
pub fn classify(operation: &Operation, error: &ApiError) -> ErrorDescriptor {
    let cause = cause_of(error);
    match operation {
        Operation::Start => ErrorDescriptor::Start { cause },
        Operation::Submit {
            index, question_id, ..
        } => ErrorDescriptor::Submit {
            index: *index,
            question_id: question_id.clone(),
            cause,
        },
        Operation::Complete { .. } => ErrorDescriptor::Complete { cause },
    }
}

/// Descriptor for a state-inconsistency fault; only a restart recovers.
#[must_use]
pub fn fault(detail: impl Into<String>) -> ErrorDescriptor {
    ErrorDescriptor::Restart {
        cause: FailureCause::InconsistentState(detail.into()),
    }
}

/// Timeouts are deliberately not distinguished from other unknown failures.
#[must_use]
pub fn cause_of(error: &ApiError) -> FailureCause {
    if error.is_timeout() {
        return FailureCause::Unknown;
    }
    if let Some(status) = error.status() {
        return match status {
            404 => FailureCause::SessionNotFound,
            409 => FailureCause::SessionClosed,
            422 => FailureCause::InvalidSession,
            429 => FailureCause::RateLimited,
            500..=599 => FailureCause::ServerError(status),
            _ => FailureCause::Unknown,
        };
    }
    if error.is_connect() {
        return FailureCause::Unreachable;
    }
    FailureCause::Unknown
}
