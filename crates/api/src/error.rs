//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use geocoder::GeocodeError;
use marketplace_core::DomainError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or invalid credentials.
    #[error("Sign in required")]
    Unauthorized,

    /// Signed in, but not allowed to do this.
    #[error("{0}")]
    Forbidden(String),

    /// Unknown or hidden resource.
    #[error("{0}")]
    NotFound(String),

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// The request conflicts with current state.
    #[error("{0}")]
    Conflict(String),

    /// Database error.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Avatar storage error.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Location lookup error.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Database(DatabaseError::Domain(err))
    }
}

impl ApiError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{} not found", what))
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(err) => match err {
                DatabaseError::NotFound { .. } => StatusCode::NOT_FOUND,
                DatabaseError::AlreadyExists { .. } | DatabaseError::Conflict { .. } => {
                    StatusCode::CONFLICT
                }
                DatabaseError::Validation(_) => StatusCode::BAD_REQUEST,
                DatabaseError::Domain(DomainError::UnknownValue { .. })
                | DatabaseError::Domain(DomainError::InvalidStars(_))
                | DatabaseError::Domain(DomainError::InvalidCoordinates(_)) => {
                    StatusCode::BAD_REQUEST
                }
                DatabaseError::Domain(_) => StatusCode::UNPROCESSABLE_ENTITY,
                DatabaseError::Sqlx(_) | DatabaseError::Migration(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::Storage(err) if err.is_user_error() => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Geocode(GeocodeError::InvalidCoordinates(_)) => StatusCode::BAD_REQUEST,
            ApiError::Geocode(err) if err.is_user_error() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Geocode(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures are logged in full and reported generically.
        let message = if status.is_server_error() {
            tracing::error!(status = %status, "Request failed: {}", self);
            match status {
                StatusCode::BAD_GATEWAY => "Location service is unavailable, please try again later".to_string(),
                _ => "Something went wrong, please try again".to_string(),
            }
        } else {
            tracing::debug!(status = %status, "Request refused: {}", self);
            self.to_string()
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use marketplace_core::location::Coordinates;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::from(DomainError::MissingRejectionReason).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(DomainError::InvalidStars(9)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Database(DatabaseError::NotFound {
                entity: "Agent",
                id: "x".to_string()
            })
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Geocode(GeocodeError::OutsideIndia(Coordinates::new(51.5, -0.12).unwrap()))
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Geocode(GeocodeError::Status(503)).status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
