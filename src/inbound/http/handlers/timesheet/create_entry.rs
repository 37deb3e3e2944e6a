use crate::core::application::ApplicationServices;
use crate::domain::timesheet::{Actor, CreateEntryError, CreateEntryParams, TimesheetService};
use crate::errors::{AppError, bad_request, conflict, forbidden, internal_error, rejected};
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use time::Date;

#[derive(Deserialize)]
pub struct CreateEntryBody {
    pub entry_date: Date,
    pub time_in: String,
    pub time_out: String,
    pub break_minutes: i32,
}

pub async fn create_entry<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<CreateEntryBody>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.timesheet_service();
    let result = service
        .create_entry(CreateEntryParams {
            actor,
            entry_date: body.entry_date,
            time_in: body.time_in,
            time_out: body.time_out,
            break_minutes: body.break_minutes,
        })
        .await
        .map_err(|e| match e {
            CreateEntryError::InvalidClock(_)
            | CreateEntryError::NegativeBreak
            | CreateEntryError::FutureDate => bad_request(e),
            CreateEntryError::NotAStudent => forbidden(e),
            CreateEntryError::NoAssignedCompany => rejected(e),
            CreateEntryError::DuplicateDay(_) | CreateEntryError::WeekFull(_) => conflict(e),
            CreateEntryError::DirectoryError(e) => internal_error(e),
            CreateEntryError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
