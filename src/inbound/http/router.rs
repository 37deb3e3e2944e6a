use crate::core::application::{Application, ApplicationServices};
use crate::domain::logbook::LogbookService;
use crate::domain::timesheet::TimesheetService;
use crate::inbound::http::handlers::{
    approve_all, create_entry, list_entries, logbook_create, logbook_list, logbook_review,
    server_health, submit_to_dean, submit_week, update_entry, week_view,
};
use crate::inbound::http::middleware::{ACTOR_ID_HEADER, actor};
use axum::Router;
use axum::extract::{MatchedPath, Request};
use axum::middleware::from_fn;
use axum::routing::{get, patch, post};
use http::header::{ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, AUTHORIZATION, CONTENT_TYPE, ORIGIN};
use http::{HeaderName, HeaderValue, Method, StatusCode};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub fn router<
    TIMESHEET: TimesheetService + Send + Sync + 'static,
    LOGBOOK: LogbookService + Send + Sync + 'static,
>(
    application: Application<TIMESHEET, LOGBOOK>,
) -> Router {
    let config = application.config();

    let hosts: Vec<HeaderValue> = config
        .cors_hosts
        .clone()
        .into_iter()
        .map(|host| host.parse().unwrap())
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers(vec![
            ORIGIN,
            AUTHORIZATION,
            ACCEPT,
            CONTENT_TYPE,
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderName::from_static("x-actor-id"),
            HeaderName::from_static("x-actor-role"),
        ])
        .allow_origin(hosts)
        .allow_credentials(true);

    Router::new()
        .route("/healthz", get(server_health))
        .nest("/backend/timesheet", timesheet_routes())
        .nest("/backend/logbook", logbook_routes())
        .layer(cors)
        .layer((
            SetSensitiveHeadersLayer::new([
                AUTHORIZATION,
                HeaderName::from_static(ACTOR_ID_HEADER),
            ]),
            CompressionLayer::new(),
            TraceLayer::new_for_http()
                .make_span_with(|req: &Request| {
                    let method = req.method();
                    let uri = req.uri();

                    let matched_path = req
                        .extensions()
                        .get::<MatchedPath>()
                        .map(|matched_path| matched_path.as_str());

                    tracing::debug_span!("request", %method, %uri, matched_path)
                })
                .on_failure(()),
            TimeoutLayer::with_status_code(
                StatusCode::GATEWAY_TIMEOUT,
                std::time::Duration::from_secs(30),
            ),
            CatchPanicLayer::new(),
        ))
        .with_state(application)
}

fn timesheet_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route("/entries", post(create_entry::<APP>).get(list_entries::<APP>))
        .route("/entries/{id}", patch(update_entry::<APP>))
        .route("/entries/approve-all", post(approve_all::<APP>))
        .route("/weeks", get(week_view::<APP>))
        .route("/weeks/submit", post(submit_week::<APP>))
        .route("/weeks/submit-to-dean", post(submit_to_dean::<APP>))
        .route_layer(from_fn(actor))
}

fn logbook_routes<APP>() -> Router<APP>
where
    APP: ApplicationServices + Send + Sync + 'static,
{
    Router::new()
        .route("/logs", post(logbook_create::<APP>).get(logbook_list::<APP>))
        .route("/logs/{id}/review", post(logbook_review::<APP>))
        .route_layer(from_fn(actor))
}
