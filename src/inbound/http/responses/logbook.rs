use crate::domain::logbook::{
    CreateLogResult, ListLogsResult, LogStatus, LogbookEntry, Narrative, ReviewLogResult,
};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

#[derive(Serialize)]
pub struct LogResponse {
    data: LogData,
}

#[derive(Serialize)]
pub struct LogListResponse {
    data: Vec<LogData>,
}

#[derive(Serialize)]
pub struct LogData {
    id: Uuid,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: LogAttributes,
}

#[derive(Serialize)]
pub struct LogAttributes {
    student_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    week_number: Option<i32>,
    #[serde(flatten)]
    narrative: Narrative,
    attachments: Vec<String>,
    status: LogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedback: Option<String>,
}

impl From<LogbookEntry> for LogData {
    fn from(value: LogbookEntry) -> Self {
        Self {
            id: value.id,
            object_type: ResponseType::Log,
            attributes: LogAttributes {
                student_id: value.student_id,
                week_number: value.week_number,
                narrative: value.narrative,
                attachments: value.attachments,
                status: value.status,
                feedback: value.feedback,
            },
        }
    }
}

impl IntoResponse for CreateLogResult {
    fn into_response(self) -> Response {
        let response = LogResponse {
            data: self.log.into(),
        };

        (StatusCode::CREATED, Json(response)).into_response()
    }
}

impl IntoResponse for ReviewLogResult {
    fn into_response(self) -> Response {
        let response = LogResponse {
            data: self.log.into(),
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl IntoResponse for ListLogsResult {
    fn into_response(self) -> Response {
        let response = LogListResponse {
            data: self.logs.into_iter().map(|log| log.into()).collect(),
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}
