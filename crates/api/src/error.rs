use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

/// A single failed business rule on a write endpoint body, reported back
/// to the caller as part of the 400 payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum InkGestError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("Request body failed validation")]
    Validation(Vec<FieldError>),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field_errors: Option<Vec<FieldError>>,
}

impl actix_web::error::ResponseError for InkGestError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let field_errors = match self {
            Self::Validation(errors) => Some(errors.clone()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            error: self.to_string(),
            field_errors,
        })
    }
}
