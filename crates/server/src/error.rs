use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;

/// The primary error type for the API.
///
/// Every handler returns this; at the boundary it renders as a JSON body of
/// the form `{"error": message}` with the matching status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed required input (400).
    #[error("{0}")]
    Validation(String),

    /// Unknown id on a lookup path (404).
    #[error("{0}")]
    NotFound(String),

    /// Metadata store failure (500).
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// File relay failure (500).
    #[error(transparent)]
    Relay(#[from] file_relay::RelayError),

    /// A catch-all for any other unexpected errors (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Relay(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            error!("{message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
