use crate::core::application::ApplicationServices;
use crate::domain::timesheet::{Actor, SubmitWeekError, SubmitWeekParams, TimesheetService};
use crate::errors::{AppError, bad_request, forbidden, internal_error, rejected};
use axum::extract::{Json, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use time::Date;

#[derive(Deserialize)]
pub struct SubmitWeekBody {
    pub from: Date,
    pub to: Date,
}

pub async fn submit_week<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<SubmitWeekBody>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.timesheet_service();
    let result = service
        .submit_week(SubmitWeekParams {
            actor,
            from: body.from,
            to: body.to,
        })
        .await
        .map_err(|e| match e {
            SubmitWeekError::NotAStudent => forbidden(e),
            SubmitWeekError::InvalidRange => bad_request(e),
            SubmitWeekError::TransitionError(_) => rejected(e),
            SubmitWeekError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::domain::logbook::MockLogbookService;
    use crate::domain::timesheet::{MockTimesheetService, SubmitWeekError, SubmitWeekResult};
    use crate::inbound::http::middleware::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use serde_json::json;
    use std::future;
    use uuid::Uuid;

    fn server(timesheet_service: MockTimesheetService) -> TestServer {
        let app = Application::<MockTimesheetService, MockLogbookService>::mock_instance(
            MockAppInstanceParameters {
                config: None,
                timesheet_service: Some(timesheet_service),
                logbook_service: None,
            },
        );

        TestServer::new(router(app)).unwrap()
    }

    #[tokio::test]
    async fn test_submit_week() {
        let mut timesheet_service = MockTimesheetService::new();
        timesheet_service
            .expect_submit_week()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Ok(SubmitWeekResult { affected: 3 }))));

        let response = server(timesheet_service)
            .post("/backend/timesheet/weeks/submit")
            .add_header(ACTOR_ID_HEADER, Uuid::now_v7().to_string())
            .add_header(ACTOR_ROLE_HEADER, "student")
            .json(&json!({ "from": "2024-01-08", "to": "2024-01-14" }))
            .await;

        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!(3, body["data"]["attributes"]["affected"]);
    }

    #[tokio::test]
    async fn test_submit_week_wrong_role() {
        let mut timesheet_service = MockTimesheetService::new();
        timesheet_service
            .expect_submit_week()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Err(SubmitWeekError::NotAStudent))));

        let response = server(timesheet_service)
            .post("/backend/timesheet/weeks/submit")
            .add_header(ACTOR_ID_HEADER, Uuid::now_v7().to_string())
            .add_header(ACTOR_ROLE_HEADER, "administrator")
            .json(&json!({ "from": "2024-01-08", "to": "2024-01-14" }))
            .await;

        response.assert_status_forbidden();
    }
}
