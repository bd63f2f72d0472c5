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

    #[error("resource not found")]
    NotFound,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> Option<String> {
        match self {
            Self::Unauthorized(message) | Self::BadRequest(message) => message.clone(),
            Self::NotFound | Self::InternalServerError => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        (
            status_code,
            Json(AppErrorResponse {
                code: status_code.as_u16(),
                status: self.to_string(),
                message: self.message(),
            }),
        )
            .into_response()
    }
}

pub fn internal_error<E: ToString>(err: E) -> AppError {
    tracing::error!("{}", err.to_string());
    AppError::InternalServerError
}

pub fn bad_request(message: impl Into<String>) -> AppError {
    AppError::BadRequest(Some(message.into()))
}

pub fn bad_request_missing_fields() -> AppError {
    bad_request(
        "Missing or invalid required fields: 'name', 'link', and a non-empty 'languages' array are required.",
    )
}

pub fn bad_request_invalid_languages<E: ToString>(err: E) -> AppError {
    bad_request(format!("Invalid language input detected: {}", err.to_string()))
}

pub fn unauthorized_missing_token() -> AppError {
    AppError::Unauthorized(Some("Unauthorized: Missing or invalid token".to_string()))
}

pub fn unauthorized_verification_failed() -> AppError {
    AppError::Unauthorized(Some("Unauthorized: Token verification failed".to_string()))
}
