use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures surfaced to API callers.
#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    /// A required field was absent or empty.
    #[error("Необходимы name и email")]
    MissingNameOrEmail,

    #[error("Пользователь не найден")]
    UserNotFound,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingNameOrEmail => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
