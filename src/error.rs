use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use rust_i18n::t;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed for {field}: {message}")]
    Validation { field: String, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("recipe generation failed")]
    Generation,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(#[from] anyhow::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// JSON error envelope returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn user_message(&self) -> String {
        match self {
            AppError::Validation { .. } => t!("errors.invalid_request").into_owned(),
            AppError::Unauthorized => t!("errors.unauthorized").into_owned(),
            AppError::Generation => t!("errors.generation_failed").into_owned(),
            AppError::Storage(message) => message.clone(),
            AppError::Config(_) | AppError::Io(_) => t!("errors.internal").into_owned(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Generation
            | AppError::Storage(_)
            | AppError::Config(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let details = match self {
            AppError::Validation { field, message } => {
                Some(serde_json::json!({ "field": field, "message": message }))
            }
            _ => None,
        };
        HttpResponse::build(self.status_code())
            .json(ErrorBody { error: self.user_message(), details })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
