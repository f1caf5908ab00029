use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        missing_fields: Vec<String>,
    },

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),
}

impl From<AnalysisError> for AppError {
    fn from(e: AnalysisError) -> Self {
        match e {
            AnalysisError::InvalidInput { fields, message } => AppError::Validation {
                message,
                missing_fields: fields,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation {
                message,
                missing_fields,
            } => {
                tracing::info!("Rejected request: {message}");
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "error": {
                            "code": "VALIDATION_ERROR",
                            "message": message,
                            "missingFields": missing_fields
                        }
                    }),
                )
            }
            AppError::UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": {
                        "code": "UNPROCESSABLE_ENTITY",
                        "message": message
                    }
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
