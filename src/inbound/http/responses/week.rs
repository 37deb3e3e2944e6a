use crate::domain::timesheet::WeekViewResult;
use crate::domain::timesheet::week::WeekStatus;
use crate::inbound::http::responses::entry::EntryData;
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

#[derive(Serialize)]
pub struct WeekResponse {
    data: WeekData,
}

#[derive(Serialize)]
pub struct WeekData {
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: WeekAttributes,
}

#[derive(Serialize)]
pub struct WeekAttributes {
    student_id: Uuid,
    week_start: Date,
    week_end: Date,
    status: WeekStatus,
    total_hours: f64,
    approved_hours: f64,
    entries: Vec<EntryData>,
}

impl IntoResponse for WeekViewResult {
    fn into_response(self) -> Response {
        let week = self.week;
        let response = WeekResponse {
            data: WeekData {
                object_type: ResponseType::Week,
                attributes: WeekAttributes {
                    student_id: week.student_id,
                    week_start: week.week_start,
                    week_end: week.week_end,
                    status: week.status,
                    total_hours: week.total_hours,
                    approved_hours: week.approved_hours,
                    entries: week.entries.into_iter().map(|entry| entry.into()).collect(),
                },
            },
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}
