use serde::{Deserialize, Serialize};

/// One catalog listing as stored in the dataset.
///
/// Field order is the column order of `books.csv` and the key order of the
/// JSON objects served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub price: f64,
    pub rating: u8,
    pub availability: String,
    pub link: String,
}

/// Maps the catalog's textual star rating to `1..=5`; anything else is `0`.
#[must_use]
pub fn rating_from_word(word: &str) -> u8 {
    match word {
        "One" => 1,
        "Two" => 2,
        "Three" => 3,
        "Four" => 4,
        "Five" => 5,
        _ => 0,
    }
}
