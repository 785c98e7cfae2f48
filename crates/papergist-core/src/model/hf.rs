use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{DecodeParams, ModelError, SummaryBackend};

pub const DEFAULT_MODEL: &str = "google-t5/t5-small";
const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";

/// Hugging Face Inference API backend for hosted summarization models.
pub struct HfInference {
    model_id: String,
    endpoint: String,
    api_key: Option<String>,
}

impl HfInference {
    pub fn new(model_id: &str, api_key: Option<String>) -> Self {
        Self {
            model_id: model_id.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key,
        }
    }

    /// Point at a different inference server (e.g. a self-hosted TGI).
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct HfRequest<'a> {
    inputs: &'a str,
    parameters: HfParameters,
    options: HfOptions,
}

#[derive(Serialize)]
struct HfParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Serialize)]
struct HfOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
struct HfSummary {
    summary_text: String,
}

impl SummaryBackend for HfInference {
    fn name(&self) -> &str {
        "Hugging Face Inference"
    }

    fn summarize<'a>(
        &'a self,
        text: &'a str,
        params: &'a DecodeParams,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>> {
        Box::pin(async move {
            if text.trim().is_empty() {
                return Err(ModelError::EmptyInput);
            }

            let url = format!("{}/models/{}", self.endpoint, self.model_id);
            let body = HfRequest {
                inputs: text,
                parameters: HfParameters {
                    max_length: params.max_length,
                    min_length: params.min_length,
                    do_sample: false,
                },
                options: HfOptions {
                    wait_for_model: true,
                },
            };

            let mut request = client.post(&url).timeout(timeout).json(&body);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let resp = request.send().await?;
            let status = resp.status();
            if !status.is_success() {
                let message = resp.text().await.unwrap_or_default();
                return Err(ModelError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let payload = resp.text().await?;
            let summaries: Vec<HfSummary> = serde_json::from_str(&payload)
                .map_err(|e| ModelError::MalformedResponse(e.to_string()))?;

            summaries
                .into_iter()
                .next()
                .map(|s| s.summary_text.trim().to_string())
                .ok_or_else(|| ModelError::MalformedResponse("empty summary array".to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_override_drops_trailing_slash() {
        let backend = HfInference::new(DEFAULT_MODEL, None).with_endpoint("http://localhost:8080/");
        assert_eq!(backend.endpoint, "http://localhost:8080");
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_request() {
        let backend = HfInference::new(DEFAULT_MODEL, None);
        let client = reqwest::Client::new();
        let err = backend
            .summarize("   ", &DecodeParams::default(), &client, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::EmptyInput));
    }
}
