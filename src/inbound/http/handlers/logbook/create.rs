use crate::core::application::ApplicationServices;
use crate::domain::logbook::{CreateLogError, CreateLogParams, LogbookService, Narrative};
use crate::domain::timesheet::Actor;
use crate::errors::{AppError, bad_request, conflict, forbidden, internal_error};
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateLogBody {
    pub week_number: Option<i32>,
    #[serde(flatten)]
    pub narrative: Narrative,
    #[serde(default)]
    pub attachments: Vec<String>,
}

pub async fn logbook_create<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<CreateLogBody>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.logbook_service();
    let result = service
        .create_log(CreateLogParams {
            actor,
            week_number: body.week_number,
            narrative: body.narrative,
            attachments: body.attachments,
        })
        .await
        .map_err(|e| match e {
            CreateLogError::NotAStudent => forbidden(e),
            CreateLogError::MissingField(_) => bad_request(e),
            CreateLogError::DuplicateWeek(_) => conflict(e),
            CreateLogError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
