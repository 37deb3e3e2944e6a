use crate::core::application::ApplicationServices;
use crate::domain::timesheet::permissions::PermissionError;
use crate::domain::timesheet::{
    Actor, EntryChange, EntryStatus, ReviewDecision, TimesheetService, UpdateEntryError,
    UpdateEntryParams,
};
use crate::errors::{AppError, bad_request, conflict, forbidden, internal_error, rejected};
use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UpdateEntryBody {
    Times {
        expected_status: EntryStatus,
        time_in: String,
        time_out: String,
        break_minutes: i32,
    },
    Submit {
        expected_status: EntryStatus,
    },
    Review {
        expected_status: EntryStatus,
        decision: ReviewDecision,
        notes: Option<String>,
    },
}

pub async fn update_entry<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Path(entry_id): Path<Uuid>,
    Json(body): Json<UpdateEntryBody>,
) -> Result<impl IntoResponse, AppError> {
    let (expected_status, change) = match body {
        UpdateEntryBody::Times {
            expected_status,
            time_in,
            time_out,
            break_minutes,
        } => (
            expected_status,
            EntryChange::Times {
                time_in,
                time_out,
                break_minutes,
            },
        ),
        UpdateEntryBody::Submit { expected_status } => (expected_status, EntryChange::Submit),
        UpdateEntryBody::Review {
            expected_status,
            decision,
            notes,
        } => (expected_status, EntryChange::Review { decision, notes }),
    };

    let service = state.timesheet_service();
    let result = service
        .update_entry(UpdateEntryParams {
            actor,
            entry_id,
            expected_status,
            change,
        })
        .await
        .map_err(|e| match e {
            UpdateEntryError::NotFound => AppError::NotFound,
            UpdateEntryError::InvalidClock(_) | UpdateEntryError::NegativeBreak => bad_request(e),
            UpdateEntryError::WrongActor => forbidden(e),
            UpdateEntryError::NotPermitted(PermissionError::Forbidden { .. }) => forbidden(e),
            UpdateEntryError::NotPermitted(PermissionError::FutureDate) => bad_request(e),
            UpdateEntryError::NotPermitted(_) => rejected(e),
            UpdateEntryError::StaleStatus { .. } => conflict(e),
            UpdateEntryError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
