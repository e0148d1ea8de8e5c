#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod memory;

pub use api::{Backend, GuideApi, InterviewApi};
pub use config::BackendConfig;
pub use error::{ApiError, ConfigError};
pub use http::HttpBackend;
pub use memory::{BackendCall, FailPoint, InMemoryBackend};
pub use reqwest::StatusCode;
