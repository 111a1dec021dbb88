use serde::{Deserialize, Serialize};

use crate::formats::BookRecord;

pub const SERVICE_NAME: &str = "Books API";
pub const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: Endpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Endpoints {
    pub books: String,
    pub book_by_id: String,
    pub search: String,
}

impl ServiceInfo {
    pub fn current() -> Self {
        Self {
            message: SERVICE_NAME.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            endpoints: Endpoints {
                books: "/books".to_owned(),
                book_by_id: "/books/{book_id}".to_owned(),
                search: "/books/search?title=...".to_owned(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Health {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookPage {
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
    pub books: Vec<BookRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub total: usize,
    pub books: Vec<BookRecord>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub author: Option<String>,
}
