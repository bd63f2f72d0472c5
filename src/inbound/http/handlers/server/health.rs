use crate::inbound::http::responses::health::HealthResponse;
use axum::response::IntoResponse;

pub async fn server_health() -> impl IntoResponse {
    HealthResponse::default()
}
