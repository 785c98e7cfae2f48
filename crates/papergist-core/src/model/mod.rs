use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::ConfigError;

pub mod hf;
pub mod mock;
pub mod openai;

pub use hf::HfInference;
pub use mock::{MockModel, MockResponse};
pub use openai::OpenAiCompatible;

/// Decoding parameters handed to the model on every call. Sampling is
/// always disabled inside the backends, so output is deterministic for a
/// given input and parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeParams {
    pub max_length: u32,
    pub min_length: u32,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            max_length: 130,
            min_length: 30,
        }
    }
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("empty input passed to the model")]
    EmptyInput,
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model endpoint returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("malformed model response: {0}")]
    MalformedResponse(String),
}

/// Trait for external summarization model backends.
///
/// The shared HTTP client and per-call timeout come from the caller so a
/// single client is reused across all requests of the process.
pub trait SummaryBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Summarize one chunk of text. Empty input is malformed input and is
    /// rejected before anything goes over the wire.
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        params: &'a DecodeParams,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>>;
}

/// Which hosted model API to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    HuggingFace,
    OpenAi,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hf" | "huggingface" => Ok(ProviderKind::HuggingFace),
            "openai" => Ok(ProviderKind::OpenAi),
            other => Err(ConfigError::UnknownProvider(other.to_string())),
        }
    }
}

/// Resolved model settings, assembled by the binaries from flags, env and
/// the config file.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub provider: ProviderKind,
    pub model_id: String,
    /// Base URL override; each backend has a sensible default.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::HuggingFace,
            model_id: hf::DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key: None,
        }
    }
}

/// Build the process-wide model backend from settings. Called once at
/// startup; the handle is shared for the lifetime of the process.
pub fn build_backend(settings: &ModelSettings) -> Arc<dyn SummaryBackend> {
    match settings.provider {
        ProviderKind::HuggingFace => {
            let mut backend = HfInference::new(&settings.model_id, settings.api_key.clone());
            if let Some(endpoint) = &settings.endpoint {
                backend = backend.with_endpoint(endpoint);
            }
            Arc::new(backend)
        }
        ProviderKind::OpenAi => {
            let mut backend = OpenAiCompatible::new(&settings.model_id, settings.api_key.clone());
            if let Some(endpoint) = &settings.endpoint {
                backend = backend.with_base_url(endpoint);
            }
            Arc::new(backend)
        }
    }
}
