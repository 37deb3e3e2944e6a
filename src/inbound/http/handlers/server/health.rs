use crate::inbound::http::responses::health::health_response;
use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;

pub async fn server_health() -> impl IntoResponse {
    let response = health_response();

    (StatusCode::OK, Json(response))
}
