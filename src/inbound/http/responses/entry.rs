use crate::domain::timesheet::hours::format_clock;
use crate::domain::timesheet::{
    CreateEntryResult, EntryStatus, ListEntriesResult, TimesheetEntry, UpdateEntryResult,
};
use crate::inbound::http::responses::shared::ResponseType;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use time::Date;
use uuid::Uuid;

#[derive(Serialize)]
pub struct EntryResponse {
    data: EntryData,
}

#[derive(Serialize)]
pub struct EntryListResponse {
    data: Vec<EntryData>,
}

#[derive(Serialize)]
pub struct EntryData {
    id: Uuid,
    #[serde(rename = "type")]
    object_type: ResponseType,
    attributes: EntryAttributes,
}

#[derive(Serialize)]
pub struct EntryAttributes {
    student_id: Uuid,
    company_id: Uuid,
    entry_date: Date,
    time_in: String,
    time_out: String,
    break_minutes: i32,
    total_hours: f64,
    status: EntryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    company_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dean_notes: Option<String>,
}

impl From<TimesheetEntry> for EntryData {
    fn from(value: TimesheetEntry) -> Self {
        Self {
            id: value.id,
            object_type: ResponseType::Entry,
            attributes: EntryAttributes {
                student_id: value.student_id,
                company_id: value.company_id,
                entry_date: value.entry_date,
                time_in: format_clock(value.time_in),
                time_out: format_clock(value.time_out),
                break_minutes: value.break_minutes,
                total_hours: value.total_hours,
                status: value.status,
                company_notes: value.company_notes,
                dean_notes: value.dean_notes,
            },
        }
    }
}

impl IntoResponse for CreateEntryResult {
    fn into_response(self) -> Response {
        let response = EntryResponse {
            data: self.entry.into(),
        };

        (StatusCode::CREATED, Json(response)).into_response()
    }
}

impl IntoResponse for UpdateEntryResult {
    fn into_response(self) -> Response {
        let response = EntryResponse {
            data: self.entry.into(),
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl IntoResponse for ListEntriesResult {
    fn into_response(self) -> Response {
        let response = EntryListResponse {
            data: self.entries.into_iter().map(|entry| entry.into()).collect(),
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}
