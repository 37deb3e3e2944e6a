use crate::core::application::ApplicationServices;
use crate::domain::timesheet::{Actor, SubmitToDeanError, SubmitToDeanParams, TimesheetService};
use crate::errors::{AppError, forbidden, internal_error, rejected};
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct SubmitToDeanBody {
    pub student_id: Uuid,
}

pub async fn submit_to_dean<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<SubmitToDeanBody>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.timesheet_service();
    let result = service
        .submit_to_dean(SubmitToDeanParams {
            actor,
            student_id: body.student_id,
        })
        .await
        .map_err(|e| match e {
            SubmitToDeanError::WrongActor => forbidden(e),
            SubmitToDeanError::NothingEligible => rejected(e),
            SubmitToDeanError::TransitionError(_) => rejected(e),
            SubmitToDeanError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
