use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{DecodeParams, ModelError, SummaryBackend};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

const SYSTEM_PROMPT: &str =
    "You are a scientific summarizer. Reply with only the summary of the provided text, \
     no preamble and no commentary.";

/// Backend for any OpenAI-compatible chat-completions server (OpenAI
/// itself, vLLM, llama.cpp server, LocalAI, ...).
///
/// Temperature is pinned to 0.0 so decoding stays deterministic; the
/// length bounds are expressed as `max_tokens` plus an instruction, since
/// the chat API has no hard minimum-length knob.
pub struct OpenAiCompatible {
    model: String,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiCompatible {
    pub fn new(model: &str, api_key: Option<String>) -> Self {
        Self {
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl SummaryBackend for OpenAiCompatible {
    fn name(&self) -> &str {
        "OpenAI-compatible"
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

            let url = format!("{}/v1/chat/completions", self.base_url);
            let user_prompt = format!(
                "Summarize the following text in roughly {} to {} tokens:\n\n{}",
                params.min_length, params.max_length, text
            );
            let body = ChatRequest {
                model: &self.model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: SYSTEM_PROMPT,
                    },
                    ChatMessage {
                        role: "user",
                        content: &user_prompt,
                    },
                ],
                temperature: 0.0,
                max_tokens: params.max_length,
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
            let parsed: ChatResponse = serde_json::from_str(&payload)
                .map_err(|e| ModelError::MalformedResponse(e.to_string()))?;

            parsed
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content.trim().to_string())
                .ok_or_else(|| ModelError::MalformedResponse("no choices in response".to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_override_drops_trailing_slash() {
        let backend =
            OpenAiCompatible::new("gpt-4o-mini", None).with_base_url("http://localhost:11434/");
        assert_eq!(backend.base_url, "http://localhost:11434");
    }

    #[tokio::test]
    async fn empty_input_is_rejected_before_any_request() {
        let backend = OpenAiCompatible::new("gpt-4o-mini", None);
        let client = reqwest::Client::new();
        let err = backend
            .summarize("", &DecodeParams::default(), &client, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::EmptyInput));
    }
}
