use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::ServiceError;
use thiserror::Error;

/// Error half of every handler: a status plus a JSON `{error, detail}` body.
#[derive(Debug, Error)]
#[error("{}: {}", .status.as_u16(), .title)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn not_found(entity: &str, id: i32) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("{entity} with ID {id} not found")))
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            // store details stay in the logs
            ServiceError::Db(_) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None),
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.title.to_string(), detail: self.detail };
        (self.status, Json(body)).into_response()
    }
}
