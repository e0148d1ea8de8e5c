use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

/// Navigation the guard intercepts while a test is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Intercept {
    /// Closing the window/tab or quitting the process.
    ExitPrompt,
    /// Navigating back out of the test.
    BackNavigation,
}

/// Handle of one registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// Host environment able to register navigation listeners.
pub trait NavigationHost: Send + Sync {
    fn register(&self, intercept: Intercept) -> ListenerHandle;
    fn unregister(&self, handle: ListenerHandle);
}

/// Listeners registered for the lifetime of one stay on the test screen.
///
/// Dropping the guard releases every listener it registered.
pub struct NavigationGuard {
    host: Arc<dyn NavigationHost>,
    handles: Vec<ListenerHandle>,
}

impl NavigationGuard {
    pub const CONFIRM_LEAVE_MESSAGE: &'static str =
        "Leave the test? Your progress will be lost.";

    #[must_use]
    pub fn acquire(host: Arc<dyn NavigationHost>) -> Self {
        let handles = [Intercept::ExitPrompt, Intercept::BackNavigation]
            .into_iter()
            .map(|intercept| host.register(intercept))
            .collect();
        debug!("navigation guard acquired");
        Self { host, handles }
    }
}

impl Drop for NavigationGuard {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            self.host.unregister(handle);
        }
        debug!("navigation guard released");
    }
}

impl fmt::Debug for NavigationGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationGuard")
            .field("handles", &self.handles)
            .finish_non_exhaustive()
    }
}

/// In-process listener table. The terminal app asks it whether to confirm
/// before quitting or going back.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next: AtomicU64,
    active: Mutex<HashMap<ListenerHandle, Intercept>>,
}

impl ListenerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_intercepting(&self, intercept: Intercept) -> bool {
        self.active
            .lock()
            .map(|active| active.values().any(|i| *i == intercept))
            .unwrap_or(false)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.lock().map(|active| active.len()).unwrap_or(0)
    }
}

impl NavigationHost for ListenerRegistry {
    fn register(&self, intercept: Intercept) -> ListenerHandle {
        let handle = ListenerHandle(self.next.fetch_add(1, Ordering::Relaxed));
        if let Ok(mut active) = self.active.lock() {
            active.insert(handle, intercept);
        }
        handle
    }

    fn unregister(&self, handle: ListenerHandle) {
        if let Ok(mut active) = self.active.lock() {
            active.remove(&handle);
        }
    }
}
