#![forbid(unsafe_code)]

pub mod analytics;
pub mod app_services;
pub mod error;
pub mod guide;
pub mod sessions;

pub use career_core::Clock;

pub use analytics::{AnalyticsEvent, AnalyticsSink, RecordingAnalytics, TracingAnalytics};
pub use app_services::{AppServices, GuideConfig};
pub use error::{AnalyticsError, AppServicesError, GuideError};
pub use guide::{AggregationResult, GuideService, MergedRole, RoleProfileView};

pub use sessions::{
    ErrorDescriptor, FailureCause, Intercept, ListenerRegistry, NavigationGuard, NavigationHost,
    RetryAction, Screen, SessionEvent, SessionMachine, SessionProgress, SessionWorkflow,
};
