use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};

use super::AppState;
use super::error::{ApiError, BOOK_NOT_FOUND, NO_BOOKS, NO_ROUTE};
use super::model::{BookPage, Health, PageParams, SearchParams, SearchResult, ServiceInfo};
use super::query;
use crate::formats::BookRecord;

/// Handle GET /
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo::current())
}

/// Handle GET /health
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy".to_owned(),
    })
}

/// Handle GET /books?skip=&limit=
pub async fn list_books(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<BookPage>, ApiError> {
    let Query(params) = params?;
    let books = load_non_empty(&state).await?;
    Ok(Json(query::paginate(books, params)))
}

/// Handle GET /books/{book_id}
pub async fn get_book(
    State(state): State<AppState>,
    book_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<BookRecord>, ApiError> {
    let Path(book_id) = book_id?;
    let books = load_non_empty(&state).await?;
    query::book_at(books, book_id)
        .map(Json)
        .ok_or(ApiError::NotFound(BOOK_NOT_FOUND))
}

/// Handle GET /books/search/?title=&author=
///
/// No match is a successful empty result; only a missing dataset is a 404.
pub async fn search_books(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResult>, ApiError> {
    let Query(params) = params?;
    let books = load_non_empty(&state).await?;
    Ok(Json(query::search(books, &params)))
}

/// Fallback for paths that match no route.
pub async fn not_found() -> ApiError {
    ApiError::NotFound(NO_ROUTE)
}

async fn load_non_empty(state: &AppState) -> Result<Vec<BookRecord>, ApiError> {
    let books = state.store.load().await.map_err(ApiError::Load)?;
    if books.is_empty() {
        return Err(ApiError::NotFound(NO_BOOKS));
    }
    tracing::debug!(count = books.len(), "loaded books");
    Ok(books)
}
