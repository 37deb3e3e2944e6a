use crate::core::application::ApplicationServices;
use crate::domain::logbook::{LogDecision, LogbookService, ReviewLogError, ReviewLogParams};
use crate::domain::timesheet::Actor;
use crate::errors::{AppError, conflict, forbidden, internal_error};
use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ReviewLogBody {
    pub decision: LogDecision,
    pub feedback: Option<String>,
}

pub async fn logbook_review<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Path(log_id): Path<Uuid>,
    Json(body): Json<ReviewLogBody>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.logbook_service();
    let result = service
        .review_log(ReviewLogParams {
            actor,
            log_id,
            decision: body.decision,
            feedback: body.feedback,
        })
        .await
        .map_err(|e| match e {
            ReviewLogError::NotFound => AppError::NotFound,
            ReviewLogError::NotAnAdministrator => forbidden(e),
            ReviewLogError::AlreadyReviewed { .. } => conflict(e),
            ReviewLogError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}
