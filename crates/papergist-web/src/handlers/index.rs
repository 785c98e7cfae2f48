use axum::Json;
use axum::response::Html;

use crate::models::HealthResponse;
use crate::template;

pub async fn index() -> Html<&'static str> {
    template::render_index()
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
