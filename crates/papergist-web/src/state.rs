use std::sync::Arc;

use papergist_core::{Config, SummaryBackend};

/// Shared application state accessible from all handlers.
///
/// The model backend and the HTTP client are built once at startup and
/// reused for every request; nothing in here is re-initialized per
/// request.
pub struct AppState {
    pub backend: Arc<dyn SummaryBackend>,
    pub client: reqwest::Client,
    pub config: Config,
}
