use std::path::{Path, PathBuf};

use anyhow::Context as _;
use async_trait::async_trait;
use tokio::fs;

use crate::dataset::{dataset_path, parse_books};
use crate::formats::BookRecord;

#[async_trait]
pub trait BookStore: Send + Sync {
    /// Loads the full dataset in stored order. An absent dataset is empty.
    async fn load(&self) -> anyhow::Result<Vec<BookRecord>>;
}

#[derive(Debug, Clone)]
pub struct CsvBookStore {
    path: PathBuf,
}

impl CsvBookStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for the dataset under an installation root.
    pub fn from_root(root: &Path) -> Self {
        Self::new(dataset_path(root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl BookStore for CsvBookStore {
    async fn load(&self) -> anyhow::Result<Vec<BookRecord>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("read: {}", self.path.display()));
            }
        };
        parse_books(&bytes).with_context(|| format!("parse: {}", self.path.display()))
    }
}
