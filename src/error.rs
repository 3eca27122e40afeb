use crate::database::DatabaseError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON body returned for every failed request
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Configuration error"),
            AppError::Database(DatabaseError::EmptyDataset(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Dataset is empty")
            }
            AppError::Database(DatabaseError::InvalidData(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Invalid data")
            }
            AppError::Database(DatabaseError::Database(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, label) = self.status_and_label();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", self);
        }

        let body = Json(ApiErrorResponse {
            error: label.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
