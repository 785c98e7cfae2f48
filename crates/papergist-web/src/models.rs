use serde::Serialize;

/// Successful response: the assembled summary.
#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Failure response: a single error string, whatever stage failed.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
