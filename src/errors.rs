use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct AppErrorResponse {
    code: u16,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("auth required")]
    Unauthorized(Option<String>),

    #[error("internal server error")]
    InternalServerError,

    #[error("bad request")]
    BadRequest(Option<String>),

    #[error("user may not perform that action")]
    Forbidden(Option<String>),

    #[error("resource not found")]
    NotFound,

    #[error("conflicting record")]
    Conflict(Option<String>),

    #[error("request was rejected")]
    Rejected(Option<String>),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            Self::Unauthorized(message)
            | Self::BadRequest(message)
            | Self::Forbidden(message)
            | Self::Conflict(message)
            | Self::Rejected(message) => message.clone(),
            Self::NotFound | Self::InternalServerError => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.status_code();

        (
            code,
            Json(AppErrorResponse {
                code: code.as_u16(),
                status: self.to_string(),
                message: self.message(),
            }),
        )
            .into_response()
    }
}

/// Workflow errors the caller can act on keep their detail; store failures
/// are logged here and surfaced as a generic failure.
pub fn internal_error<E: ToString>(err: E) -> AppError {
    tracing::error!("{}", err.to_string());
    AppError::InternalServerError
}

pub fn bad_request<E: ToString>(err: E) -> AppError {
    AppError::BadRequest(Some(err.to_string()))
}

pub fn forbidden<E: ToString>(err: E) -> AppError {
    AppError::Forbidden(Some(err.to_string()))
}

pub fn conflict<E: ToString>(err: E) -> AppError {
    AppError::Conflict(Some(err.to_string()))
}

pub fn rejected<E: ToString>(err: E) -> AppError {
    AppError::Rejected(Some(err.to_string()))
}
