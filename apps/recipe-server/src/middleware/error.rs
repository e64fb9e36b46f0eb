//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use recipe_core::RecipeError;
use recipe_core::ports::MediaError;
use recipe_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Validation(Vec<String>),
    BadGateway(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::BadGateway(msg) => write!(f, "Upstream failure: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized(detail),
            AppError::Forbidden(detail) => ErrorResponse::forbidden(detail),
            AppError::Validation(errors) => ErrorResponse::validation(errors.clone()),
            AppError::BadGateway(detail) => ErrorResponse::bad_gateway(detail),
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<RecipeError> for AppError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::NotFound { .. } => AppError::NotFound(err.to_string()),
            RecipeError::Forbidden { .. } => AppError::Forbidden(err.to_string()),
            RecipeError::Upload(MediaError::Rejected(msg)) => {
                AppError::BadRequest(format!("Picture rejected: {}", msg))
            }
            RecipeError::Upload(MediaError::Unavailable(_)) | RecipeError::Posting(_) => {
                AppError::BadGateway(err.to_string())
            }
            RecipeError::Store(e) => {
                tracing::error!("Record store error: {}", e);
                AppError::Internal("Record store error".to_string())
            }
            RecipeError::Diverged { .. } => AppError::Internal(err.to_string()),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use recipe_core::ports::StoreError;

    #[test]
    fn test_recipe_error_status() {
        let cases = [
            (
                RecipeError::NotFound {
                    post_id: "t3_a".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                RecipeError::Forbidden {
                    post_id: "t3_a".into(),
                },
                StatusCode::FORBIDDEN,
            ),
            (
                RecipeError::Upload(MediaError::Rejected("ftp".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                RecipeError::Store(StoreError::Connection("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }
}
