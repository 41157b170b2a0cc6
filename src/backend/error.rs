use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::database::models::InvalidTransactionType;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

impl From<InvalidTransactionType> for ApiError {
    fn from(err: InvalidTransactionType) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Database(error) => {
                tracing::error!(?error, "database error");
                "Internal server error".to_string()
            }
            ApiError::Internal(msg) => {
                tracing::error!(%msg, "internal error");
                msg.clone()
            }
        };

        (self.status(), Json(json!({ "detail": detail }))).into_response()
    }
}
