use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use plurabus_core::{ActionError, LinkError, ValidationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid action")]
    Action(#[from] ActionError),

    #[error("Missing queries")]
    MissingQueries,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Not found")]
    NotFound,

    #[error("template {0} is not embedded")]
    MissingTemplate(&'static str),

    #[error("generated lobby key was rejected: {0}")]
    LobbyKey(#[from] LinkError),

    #[error("failed to encode launch payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Action(_)
            | AppError::MissingQueries
            | AppError::InvalidToken => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MissingTemplate(_) | AppError::LobbyKey(_) | AppError::Payload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error\n".to_string()
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
            format!("{self}\n")
        };
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
