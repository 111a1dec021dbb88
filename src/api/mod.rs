//! Read-only HTTP interface over the book dataset.
//!
//! Every data request reloads the dataset through [`store::BookStore`]; no
//! state survives between requests. A book's id is its zero-based position
//! in the file as loaded, so ids can shift after the dataset is re-scraped.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod model;
pub mod query;
pub mod store;

use store::BookStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookStore>,
}

impl AppState {
    pub fn new(store: impl BookStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/books", get(handlers::list_books))
        .route("/books/search/", get(handlers::search_books))
        .route("/books/:book_id", get(handlers::get_book))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
