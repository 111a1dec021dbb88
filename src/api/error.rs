use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub const NO_BOOKS: &str = "no books found";
pub const BOOK_NOT_FOUND: &str = "book not found";
pub const NO_ROUTE: &str = "Not Found";

/// Error body: `{"detail": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("failed to load books")]
    Load(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Load(err) => {
                tracing::error!(?err, "load books");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({ "detail": self.to_string() });
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}
