use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::{oembed::OembedError, response::ApiResponse};

/// Domain errors surfaced to clients through the response envelope.
///
/// Unexpected persistence or signing failures map to 500 instead of being
/// folded into a 200-with-`success:false` body; only the message of
/// client-caused errors is echoed back.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Email is already taken")]
    DuplicateEmail,

    #[error("This video is already added to your list")]
    DuplicateVideo,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Failed to fetch video details from YouTube. Please check the URL.")]
    MetadataFetch(#[source] OembedError),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::DuplicateEmail
            | AppError::DuplicateVideo
            | AppError::InvalidCredentials
            | AppError::MetadataFetch(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::UserNotFound(_) | AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }
        (status, Json(ApiResponse::<()>::fail(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        assert_eq!(
            AppError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::DuplicateEmail.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::DuplicateVideo.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidCredentials.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::MetadataFetch(OembedError::Status(404)).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn auth_and_missing_resources_keep_their_codes() {
        assert_eq!(
            AppError::Unauthorized("no header".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::UserNotFound("a@b.c".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn unexpected_failures_are_server_errors() {
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Database(sqlx::Error::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn user_not_found_message_names_the_email() {
        let msg = AppError::UserNotFound("kid@example.com".into()).to_string();
        assert_eq!(msg, "User 'kid@example.com' not found");
    }
}
