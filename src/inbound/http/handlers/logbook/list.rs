use crate::core::application::ApplicationServices;
use crate::domain::logbook::{ListLogsError, ListLogsParams, LogbookService};
use crate::domain::timesheet::Actor;
use crate::errors::{AppError, forbidden, internal_error};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListLogsQuery {
    pub student_id: Option<Uuid>,
}

pub async fn logbook_list<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<ListLogsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.logbook_service();
    let result = service
        .list_logs(ListLogsParams {
            actor,
            student_id: query.student_id,
        })
        .await
        .map_err(|e| match e {
            ListLogsError::WrongActor => forbidden(e),
            ListLogsError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
