use crate::domain::timesheet::{ApproveAllResult, SubmitToDeanResult, SubmitWeekResult};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

#[derive(Serialize)]
pub struct BulkResponse {
    data: BulkData,
}

#[derive(Serialize)]
pub struct BulkData {
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: BulkAttributes,
}

#[derive(Serialize)]
pub struct BulkAttributes {
    affected: u64,
}

fn bulk_response(affected: u64) -> Response {
    let response = BulkResponse {
        data: BulkData {
            object_type: ResponseType::BulkTransition,
            attributes: BulkAttributes { affected },
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}

impl IntoResponse for SubmitWeekResult {
    fn into_response(self) -> Response {
        bulk_response(self.affected)
    }
}

impl IntoResponse for ApproveAllResult {
    fn into_response(self) -> Response {
        bulk_response(self.affected)
    }
}

impl IntoResponse for SubmitToDeanResult {
    fn into_response(self) -> Response {
        bulk_response(self.affected)
    }
}
