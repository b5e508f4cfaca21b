//! Unified error handling for the dashboard's HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::components::ExportError;
use crate::db::RepositoryError;
use crate::models::{Identity, ValidationError};

/// Application-level error type for dashboard handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required form input is missing. The message is shown inline.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Building a download failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same id already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// User is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// User lacks permission.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::NotFound(id),
            RepositoryError::Conflict(id) => Self::Conflict(id),
            err @ RepositoryError::ImmutableId(_) => Self::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Export(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Dashboard request error"
            );
        }

        let status = match &self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Export(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Export(_) => "Export failed".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from the signed-in identity.
pub fn set_sentry_user(identity: &Identity) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(identity.email.to_string()),
            username: Some(identity.role.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
