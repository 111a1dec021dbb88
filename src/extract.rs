use scraper::{ElementRef, Html, Selector};

use crate::formats::{BookRecord, rating_from_word};

const CURRENCY_SYMBOL: char = '£';
const RATING_CLASS: &str = "star-rating";

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("invalid selector {selector:?}: {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },

    #[error("entry {entry}: missing element `{selector}`")]
    MissingElement {
        entry: usize,
        selector: &'static str,
    },

    #[error("entry {entry}: `{selector}` has no `{attr}` attribute")]
    MissingAttribute {
        entry: usize,
        selector: &'static str,
        attr: &'static str,
    },

    #[error("entry {entry}: price is not numeric: {text:?}")]
    InvalidPrice { entry: usize, text: String },
}

struct ListingSelectors {
    entry: Selector,
    title_link: Selector,
    price: Selector,
    rating: Selector,
    availability: Selector,
}

impl ListingSelectors {
    const ENTRY: &'static str = "article.product_pod";
    const TITLE_LINK: &'static str = "h3 > a";
    const PRICE: &'static str = "p.price_color";
    const RATING: &'static str = "p.star-rating";
    const AVAILABILITY: &'static str = "p.instock.availability";

    fn new() -> Result<Self, ExtractError> {
        Ok(Self {
            entry: parse_selector(Self::ENTRY)?,
            title_link: parse_selector(Self::TITLE_LINK)?,
            price: parse_selector(Self::PRICE)?,
            rating: parse_selector(Self::RATING)?,
            availability: parse_selector(Self::AVAILABILITY)?,
        })
    }
}

fn parse_selector(selector: &'static str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|err| ExtractError::Selector {
        selector,
        message: err.to_string(),
    })
}

/// Parses every listing entry on a catalog page, in document order.
///
/// Any malformed entry fails the whole page. `link_base` is prepended to each
/// relative href verbatim, so `../` segments are kept as-is.
pub fn extract_books(html: &str, link_base: &str) -> Result<Vec<BookRecord>, ExtractError> {
    let selectors = ListingSelectors::new()?;
    let document = Html::parse_document(html);

    document
        .select(&selectors.entry)
        .enumerate()
        .map(|(entry, element)| extract_entry(&selectors, entry, element, link_base))
        .collect()
}

fn extract_entry(
    selectors: &ListingSelectors,
    entry: usize,
    element: ElementRef<'_>,
    link_base: &str,
) -> Result<BookRecord, ExtractError> {
    let title_link = first(element, &selectors.title_link, entry, ListingSelectors::TITLE_LINK)?;
    let title = attr(title_link, "title", entry, ListingSelectors::TITLE_LINK)?;
    let href = attr(title_link, "href", entry, ListingSelectors::TITLE_LINK)?;

    let price_text = text(first(element, &selectors.price, entry, ListingSelectors::PRICE)?);
    let price = parse_price(&price_text).ok_or_else(|| ExtractError::InvalidPrice {
        entry,
        text: price_text.clone(),
    })?;

    let rating_el = first(element, &selectors.rating, entry, ListingSelectors::RATING)?;
    let rating = rating_el
        .value()
        .attr("class")
        .unwrap_or_default()
        .split_whitespace()
        .find(|token| *token != RATING_CLASS)
        .map(rating_from_word)
        .unwrap_or(0);

    let availability = text(first(
        element,
        &selectors.availability,
        entry,
        ListingSelectors::AVAILABILITY,
    )?)
    .trim()
    .to_owned();

    Ok(BookRecord {
        title: title.to_owned(),
        price,
        rating,
        availability,
        link: format!("{link_base}{href}"),
    })
}

fn first<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
    entry: usize,
    name: &'static str,
) -> Result<ElementRef<'a>, ExtractError> {
    element
        .select(selector)
        .next()
        .ok_or(ExtractError::MissingElement {
            entry,
            selector: name,
        })
}

fn attr<'a>(
    element: ElementRef<'a>,
    attr: &'static str,
    entry: usize,
    selector: &'static str,
) -> Result<&'a str, ExtractError> {
    element
        .value()
        .attr(attr)
        .ok_or(ExtractError::MissingAttribute {
            entry,
            selector,
            attr,
        })
}

fn text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn parse_price(text: &str) -> Option<f64> {
    text.replace(CURRENCY_SYMBOL, "").trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK_BASE: &str = "http://books.example/catalogue/";

    fn entry_html(title: &str, href: &str, price: &str, rating: &str, availability: &str) -> String {
        format!(
            r#"<article class="product_pod">
  <div class="image_container"><a href="{href}"><img src="x.jpg" alt="{title}"></a></div>
  <p class="star-rating {rating}"><i class="icon-star"></i></p>
  <h3><a href="{href}" title="{title}">{title}</a></h3>
  <div class="product_price">
    <p class="price_color">{price}</p>
    <p class="instock availability">
      <i class="icon-ok"></i>
        {availability}
    </p>
  </div>
</article>"#
        )
    }

    fn page_html(entries: &[String]) -> String {
        format!(
            "<!doctype html><html><body><ol class=\"row\">{}</ol></body></html>",
            entries
                .iter()
                .map(|e| format!("<li>{e}</li>"))
                .collect::<String>()
        )
    }

    #[test]
    fn extracts_entries_in_document_order() {
        let html = page_html(&[
            entry_html(
                "A Light in the Attic",
                "a-light-in-the-attic_1000/index.html",
                "£51.77",
                "Three",
                "In stock",
            ),
            entry_html(
                "Tipping the Velvet",
                "tipping-the-velvet_999/index.html",
                "£53.74",
                "One",
                "In stock",
            ),
        ]);

        let books = extract_books(&html, LINK_BASE).unwrap();
        assert_eq!(
            books,
            vec![
                BookRecord {
                    title: "A Light in the Attic".to_owned(),
                    price: 51.77,
                    rating: 3,
                    availability: "In stock".to_owned(),
                    link: "http://books.example/catalogue/a-light-in-the-attic_1000/index.html"
                        .to_owned(),
                },
                BookRecord {
                    title: "Tipping the Velvet".to_owned(),
                    price: 53.74,
                    rating: 1,
                    availability: "In stock".to_owned(),
                    link: "http://books.example/catalogue/tipping-the-velvet_999/index.html"
                        .to_owned(),
                },
            ]
        );
    }

    #[test]
    fn link_keeps_parent_segments() {
        let html = page_html(&[entry_html(
            "Up",
            "../books/up_1/index.html",
            "£1.00",
            "Two",
            "In stock",
        )]);

        let books = extract_books(&html, LINK_BASE).unwrap();
        assert_eq!(
            books[0].link,
            "http://books.example/catalogue/../books/up_1/index.html"
        );
    }

    #[test]
    fn unknown_rating_token_maps_to_zero() {
        let html = page_html(&[entry_html("Odd", "odd/index.html", "£2.50", "Six", "In stock")]);

        let books = extract_books(&html, LINK_BASE).unwrap();
        assert_eq!(books[0].rating, 0);
    }

    #[test]
    fn non_numeric_price_fails_the_page() {
        let html = page_html(&[
            entry_html("Fine", "fine/index.html", "£3.00", "Four", "In stock"),
            entry_html("Broken", "broken/index.html", "£free", "Five", "In stock"),
        ]);

        let err = extract_books(&html, LINK_BASE).unwrap_err();
        assert!(
            matches!(err, ExtractError::InvalidPrice { entry: 1, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn missing_title_attribute_fails_the_page() {
        let html = page_html(&[r#"<article class="product_pod">
  <p class="star-rating One"></p>
  <h3><a href="x/index.html">No title attr</a></h3>
  <p class="price_color">£4.00</p>
  <p class="instock availability">In stock</p>
</article>"#
            .to_owned()]);

        let err = extract_books(&html, LINK_BASE).unwrap_err();
        assert!(
            matches!(err, ExtractError::MissingAttribute { attr: "title", .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn page_without_entries_yields_nothing() {
        let books = extract_books("<html><body><p>empty</p></body></html>", LINK_BASE).unwrap();
        assert!(books.is_empty());
    }
}
