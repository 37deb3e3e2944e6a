use crate::core::application::ApplicationServices;
use crate::domain::timesheet::{Actor, ApproveAllError, ApproveAllParams, TimesheetService};
use crate::errors::{AppError, forbidden, internal_error, rejected};
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ApproveAllBody {
    pub student_id: Uuid,
}

pub async fn approve_all<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<ApproveAllBody>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.timesheet_service();
    let result = service
        .approve_all(ApproveAllParams {
            actor,
            student_id: body.student_id,
        })
        .await
        .map_err(|e| match e {
            ApproveAllError::NotACompany | ApproveAllError::NotAssigned => forbidden(e),
            ApproveAllError::TransitionError(_) => rejected(e),
            ApproveAllError::DirectoryError(e) => internal_error(e),
            ApproveAllError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
