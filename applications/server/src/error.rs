/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use spendwise_core::SpendwiseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Message sent for every 5xx; details only go to the log
const INTERNAL_MESSAGE: &str = "Server error";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Domain(#[from] SpendwiseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl ServerError {
    /// Status code and client-facing message
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            ServerError::Domain(e) => domain_status(e),
            ServerError::Jwt(e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Config(msg) => {
                tracing::error!("Config error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            ServerError::Bcrypt(e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

fn domain_status(err: &SpendwiseError) -> (StatusCode, String) {
    match err {
        SpendwiseError::MissingField(_) => (
            StatusCode::BAD_REQUEST,
            "Please provide all required fields".to_string(),
        ),
        SpendwiseError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        SpendwiseError::InvalidId { entity, .. } => {
            (StatusCode::BAD_REQUEST, format!("Invalid {entity} ID"))
        }
        SpendwiseError::NotFound { entity, .. } => {
            (StatusCode::NOT_FOUND, format!("{entity} not found"))
        }
        SpendwiseError::Duplicate(what) => (StatusCode::CONFLICT, format!("{what} already exists")),
        SpendwiseError::Storage(detail) => {
            tracing::error!("Storage error: {}", detail);
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
