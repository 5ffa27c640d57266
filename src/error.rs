use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::MessageResponse;

/// Failures reaching or querying the persistent store
///
/// Every variant surfaces to callers as "store unavailable".
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Decode error: {0}")]
    Decode(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// `message` is what the caller sees; `source` is only logged
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wraps a store failure with the message returned to the caller
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { message, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = AppError::NotFound("Content not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_input_maps_to_400() {
        let response = AppError::InvalidInput("bad body".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failure_maps_to_500() {
        let err = AppError::store("Error fetching content")(StoreError::Decode(
            "unknown content type 'x'".to_string(),
        ));
        assert_eq!(
            err.to_string(),
            "Error fetching content: Decode error: unknown content type 'x'"
        );
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
