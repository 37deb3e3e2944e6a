use crate::core::application::ApplicationServices;
use crate::domain::timesheet::{Actor, TimesheetService, WeekViewError, WeekViewParams};
use crate::errors::{AppError, forbidden, internal_error};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct WeekViewQuery {
    pub student_id: Uuid,
    /// Any date inside the week of interest.
    pub week_of: Date,
}

pub async fn week_view<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<WeekViewQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.timesheet_service();
    let result = service
        .week_view(WeekViewParams {
            actor,
            student_id: query.student_id,
            week_of: query.week_of,
        })
        .await
        .map_err(|e| match e {
            WeekViewError::WrongActor => forbidden(e),
            WeekViewError::DirectoryError(e) => internal_error(e),
            WeekViewError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::domain::logbook::MockLogbookService;
    use crate::domain::timesheet::week::WeekGroup;
    use crate::domain::timesheet::{MockTimesheetService, WeekViewResult};
    use crate::inbound::http::middleware::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
    use crate::inbound::http::router;
    use axum_test::TestServer;
    use std::future;
    use time::macros::date;
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
    async fn test_week_view() {
        let student_id = Uuid::now_v7();
        let week = WeekGroup::build(student_id, date!(2024 - 01 - 10), vec![]);

        let mut timesheet_service = MockTimesheetService::new();
        timesheet_service
            .expect_week_view()
            .times(1)
            .return_once(move |_| Box::pin(future::ready(Ok(WeekViewResult { week }))));

        let response = server(timesheet_service)
            .get("/backend/timesheet/weeks")
            .add_query_param("student_id", student_id.to_string())
            .add_query_param("week_of", "2024-01-10")
            .add_header(ACTOR_ID_HEADER, student_id.to_string())
            .add_header(ACTOR_ROLE_HEADER, "student")
            .await;

        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert_eq!("draft", body["data"]["attributes"]["status"]);
        assert_eq!("2024-01-08", body["data"]["attributes"]["week_start"]);
    }
}
