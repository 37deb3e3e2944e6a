use crate::inbound::http::responses::shared::ResponseType;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    data: HealthData,
    #[serde(rename = "type")]
    object_type: ResponseType,
}

#[derive(Serialize)]
pub struct HealthData {
    status: String,
    version: String,
}

pub fn health_response() -> HealthResponse {
    HealthResponse {
        data: HealthData {
            status: "OK".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        object_type: ResponseType::Health,
    }
}
