//! Mock model backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{DecodeParams, ModelError, SummaryBackend};

/// A configurable mock response for [`MockModel`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this text as the summary.
    Summary(String),
    /// Return `sum(<input>)`, which makes fragment ordering visible in
    /// assembled summaries.
    Echo,
    /// Simulate a failing endpoint.
    Error { status: u16, message: String },
}

/// A hand-rolled mock implementing [`SummaryBackend`] for tests.
///
/// Supports:
/// - A fixed response (used for every call), **or**
/// - A sequence of responses (one per call, repeating the last if
///   exhausted).
/// - Optional per-call latency.
/// - Call counting and a record of every input, so tests can assert call
///   order and chunk contents.
pub struct MockModel {
    /// If non-empty, each call pops the next response.
    responses: Mutex<Vec<MockResponse>>,
    /// Fallback when the sequence is empty (or single-response mode).
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    inputs: Mutex<Vec<String>>,
}

impl MockModel {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            call_count: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that echoes `sum(<input>)` back.
    pub fn echoing() -> Self {
        Self::new(MockResponse::Echo)
    }

    /// Create a mock that returns responses in order, repeating the last.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reverse so we can pop() from the front cheaply.
        responses.reverse();
        let fallback = responses.first().cloned().unwrap();
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// Set simulated latency per call.
    #[allow(dead_code)]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `summarize()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every input passed to `summarize()`, in call order.
    pub fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        let mut seq = self.responses.lock().unwrap();
        if let Some(resp) = seq.pop() {
            resp
        } else {
            self.fallback.clone()
        }
    }
}

impl SummaryBackend for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    fn summarize<'a>(
        &'a self,
        text: &'a str,
        _params: &'a DecodeParams,
        _client: &'a reqwest::Client,
        _timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.inputs.lock().unwrap().push(text.to_string());
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if text.trim().is_empty() {
                return Err(ModelError::EmptyInput);
            }
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Summary(s) => Ok(s),
                MockResponse::Echo => Ok(format!("sum({text})")),
                MockResponse::Error { status, message } => Err(ModelError::Api { status, message }),
            }
        })
    }
}
