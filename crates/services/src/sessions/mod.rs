mod classify;
mod descriptor;
mod guard;
mod machine;
mod operation;
mod progress;
mod workflow;

// Public API of the session subsystem.
pub use classify::{cause_of, classify, fault};
pub use descriptor::{ErrorDescriptor, FailureCause, RetryAction};
pub use guard::{Intercept, ListenerHandle, ListenerRegistry, NavigationGuard, NavigationHost};
pub use machine::{Applied, Screen, SessionEvent, SessionMachine};
pub use operation::{
    Generation, Operation, OperationOutcome, OperationSuccess, RetryableOperation,
};
pub use progress::SessionProgress;
pub use workflow::SessionWorkflow;
