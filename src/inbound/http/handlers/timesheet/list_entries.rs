use crate::core::application::ApplicationServices;
use crate::domain::timesheet::{Actor, ListEntriesError, ListEntriesParams, TimesheetService};
use crate::errors::{AppError, forbidden, internal_error};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Extension;
use serde::Deserialize;
use time::Date;
use uuid::Uuid;

#[derive(Deserialize)]
pub struct ListEntriesQuery {
    pub student_id: Option<Uuid>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

pub async fn list_entries<S: ApplicationServices>(
    State(state): State<S>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<ListEntriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let service = state.timesheet_service();
    let result = service
        .list_entries(ListEntriesParams {
            actor,
            student_id: query.student_id,
            from: query.from,
            to: query.to,
        })
        .await
        .map_err(|e| match e {
            ListEntriesError::WrongActor => forbidden(e),
            ListEntriesError::DatabaseError(e) => internal_error(e),
        })?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::core::application::Application;
    use crate::core::application::tests::MockAppInstanceParameters;
    use crate::domain::logbook::MockLogbookService;
    use crate::domain::timesheet::{ListEntriesError, ListEntriesResult, MockTimesheetService};
    use crate::inbound::http::middleware::{ACTOR_ID_HEADER, ACTOR_ROLE_HEADER};
    use crate::inbound::http::router;
    use axum_test::TestServer;
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
    async fn test_list_entries() {
        let mut timesheet_service = MockTimesheetService::new();
        timesheet_service
            .expect_list_entries()
            .times(1)
            .return_once(|_| {
                Box::pin(future::ready(Ok(ListEntriesResult { entries: vec![] })))
            });

        let response = server(timesheet_service)
            .get("/backend/timesheet/entries")
            .add_header(ACTOR_ID_HEADER, Uuid::now_v7().to_string())
            .add_header(ACTOR_ROLE_HEADER, "student")
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_list_entries_forbidden() {
        let mut timesheet_service = MockTimesheetService::new();
        timesheet_service
            .expect_list_entries()
            .times(1)
            .return_once(|_| Box::pin(future::ready(Err(ListEntriesError::WrongActor))));

        let response = server(timesheet_service)
            .get("/backend/timesheet/entries")
            .add_query_param("student_id", Uuid::now_v7().to_string())
            .add_header(ACTOR_ID_HEADER, Uuid::now_v7().to_string())
            .add_header(ACTOR_ROLE_HEADER, "student")
            .await;

        response.assert_status_forbidden();
    }
}
