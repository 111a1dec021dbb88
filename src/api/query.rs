use crate::formats::BookRecord;

use super::model::{BookPage, PageParams, SearchParams, SearchResult};

pub fn paginate(books: Vec<BookRecord>, params: PageParams) -> BookPage {
    let total = books.len();
    let books = books
        .into_iter()
        .skip(params.skip)
        .take(params.limit)
        .collect();

    BookPage {
        total,
        skip: params.skip,
        limit: params.limit,
        books,
    }
}

/// Looks up a book by its position. Negative or out-of-range ids find nothing.
pub fn book_at(mut books: Vec<BookRecord>, book_id: i64) -> Option<BookRecord> {
    let idx = usize::try_from(book_id).ok()?;
    if idx >= books.len() {
        return None;
    }
    Some(books.swap_remove(idx))
}

/// Applies the title filter, then the author filter. Empty parameters are ignored.
///
/// Records carry no author, so any non-empty author filter matches nothing.
pub fn search(books: Vec<BookRecord>, params: &SearchParams) -> SearchResult {
    let title = non_empty(params.title.as_deref()).map(str::to_lowercase);
    let author = non_empty(params.author.as_deref());

    let books: Vec<BookRecord> = books
        .into_iter()
        .filter(|book| {
            title
                .as_deref()
                .is_none_or(|needle| book.title.to_lowercase().contains(needle))
        })
        .filter(|_| author.is_none())
        .collect();

    SearchResult {
        total: books.len(),
        books,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
