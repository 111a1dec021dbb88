use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::formats::BookRecord;

pub const DATA_DIR: &str = "data";
pub const DATASET_FILE: &str = "books.csv";

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

/// Location the API reads from: `<root>/data/books.csv`.
pub fn dataset_path(root: &Path) -> PathBuf {
    data_dir(root).join(DATASET_FILE)
}

/// Replaces the dataset at `path` with `books`, header row first.
///
/// Rows are written to a temporary sibling and renamed into place, so readers
/// see either the previous file or the complete new one.
pub fn write_books(path: &Path, books: &[BookRecord]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("dataset path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(parent)
        .with_context(|| format!("create data dir: {}", parent.display()))?;

    let bytes = encode_books(books).context("encode dataset")?;

    let tmp_path = path.with_extension(format!("tmp.{}", uuid::Uuid::new_v4().simple()));
    std::fs::write(&tmp_path, &bytes)
        .with_context(|| format!("write tmp: {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("rename tmp to final: {}", path.display()))?;

    Ok(())
}

/// Reads the dataset at `path`. A missing file is an empty dataset.
pub fn read_books(path: &Path) -> anyhow::Result<Vec<BookRecord>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => {
            return Err(err).with_context(|| format!("read dataset: {}", path.display()));
        }
    };
    parse_books(&bytes).with_context(|| format!("parse dataset: {}", path.display()))
}

pub fn encode_books(books: &[BookRecord]) -> anyhow::Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if books.is_empty() {
        writer
            .write_record(["title", "price", "rating", "availability", "link"])
            .context("write csv header")?;
    }
    for book in books {
        writer.serialize(book).context("write csv row")?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("flush csv writer: {err}"))
}

pub fn parse_books(bytes: &[u8]) -> anyhow::Result<Vec<BookRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    reader
        .deserialize::<BookRecord>()
        .enumerate()
        .map(|(idx, row)| row.with_context(|| format!("parse csv row {}", idx + 1)))
        .collect()
}
