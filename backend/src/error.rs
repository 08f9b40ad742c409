//! Error handling for the Agro Advisor service
//!
//! Every route renders HTML, so errors render through the same result page
//! the handlers use, with an appropriate status code.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Form input errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A categorical value the model encoders have never seen.
    #[error("Unknown {field}: {value:?}")]
    UnknownCategory { field: String, value: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Weather service unavailable")]
    WeatherServiceUnavailable,

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Internal errors
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

#[derive(Template)]
#[template(path = "result.html")]
struct ErrorPage {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation { message, .. } => {
                (StatusCode::BAD_REQUEST, format!("Error: {}", message))
            }
            AppError::ValidationError(msg) => {
                (StatusCode::BAD_REQUEST, format!("Error: {}", msg))
            }
            AppError::UnknownCategory { field, value } => (
                StatusCode::BAD_REQUEST,
                format!("Error: {} {:?} is not a value the model was trained on", field, value),
            ),
            AppError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, format!("Error: {} not found", resource))
            }
            AppError::WeatherServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Error: the weather service is temporarily unavailable".to_string(),
            ),
            AppError::ExternalService(msg) => {
                (StatusCode::BAD_GATEWAY, format!("Error: {}", msg))
            }
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error: configuration problem: {}", msg),
            ),
            AppError::Template(_) | AppError::Internal(_) | AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error: an internal server error occurred".to_string(),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        let page = ErrorPage {
            message: message.clone(),
        };
        let body = page.render().unwrap_or(message);
        (status, Html(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
