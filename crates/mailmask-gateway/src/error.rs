use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mailmask_assign::AssignError;
use mailmask_core::{RouterError, StorageError};
use serde::Serialize;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<AssignError> for ApiError {
    fn from(err: AssignError) -> Self {
        match &err {
            AssignError::KeyProduction(_) => Self::BadRequest(err.to_string()),
            AssignError::Storage(StorageError::UndefinedKey(_))
            | AssignError::Storage(StorageError::UndefinedValue(_))
            | AssignError::Router(RouterError::Undefined(_)) => Self::NotFound(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(ErrorBody { message })).into_response()
    }
}
