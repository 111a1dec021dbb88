use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use reqwest::header::{ACCEPT, USER_AGENT};
use url::Url;

use crate::cli::ScrapeArgs;
use crate::extract::{ExtractError, extract_books};
use crate::formats::BookRecord;

pub const PAGE_PLACEHOLDER: &str = "{page}";
const SAMPLE_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub pages: u32,
    pub url_template: String,
    pub link_base: String,
    pub timeout: Duration,
    pub delay: Duration,
}

impl CrawlOptions {
    pub fn page_url(&self, page: u32) -> String {
        self.url_template.replace(PAGE_PLACEHOLDER, &page.to_string())
    }

    /// Rejects templates that cannot produce an absolute http(s) page URL.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.url_template.contains(PAGE_PLACEHOLDER) {
            anyhow::bail!(
                "--url-template must contain {PAGE_PLACEHOLDER}: {}",
                self.url_template
            );
        }
        let first = self.page_url(1);
        let url = Url::parse(&first).with_context(|| format!("parse page url: {first}"))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            anyhow::bail!("--url-template must be http/https: {url}");
        }
        Ok(())
    }
}

impl From<&ScrapeArgs> for CrawlOptions {
    fn from(args: &ScrapeArgs) -> Self {
        Self {
            pages: args.pages,
            url_template: args.url_template.clone(),
            link_base: args.link_base.clone(),
            timeout: Duration::from_secs(args.timeout_secs),
            delay: Duration::from_millis(args.delay_ms),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("GET {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url}: unexpected status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("parse {url}: {source}")]
    Extract {
        url: String,
        #[source]
        source: ExtractError,
    },
}

pub fn build_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context("build catalog http client")
}

pub async fn run(args: ScrapeArgs) -> anyhow::Result<()> {
    let options = CrawlOptions::from(&args);
    options.validate()?;

    let out_path = PathBuf::from(&args.root)
        .join(crate::dataset::DATA_DIR)
        .join(&args.output);

    let client = build_client(options.timeout)?;

    tracing::info!(pages = options.pages, "starting catalog scrape");
    let books = crawl_catalog(&client, &options).await;
    tracing::info!(total = books.len(), "scrape finished");

    if books.is_empty() {
        tracing::warn!(path = %out_path.display(), "no books collected; dataset left unchanged");
        return Ok(());
    }

    crate::dataset::write_books(&out_path, &books).context("write dataset")?;
    tracing::info!(path = %out_path.display(), records = books.len(), "dataset saved");

    log_summary(&books);
    Ok(())
}

/// Fetches pages `1..=pages` one at a time and concatenates their listings.
///
/// A page that fails to download or parse contributes nothing; the crawl moves
/// on to the next page. `delay` is slept between every two consecutive fetches.
pub async fn crawl_catalog(client: &reqwest::Client, options: &CrawlOptions) -> Vec<BookRecord> {
    let mut books = Vec::new();

    for page in 1..=options.pages {
        if page > 1 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        let url = options.page_url(page);
        tracing::info!(page, %url, "processing page");

        match scrape_page(client, &url, &options.link_base).await {
            Ok(page_books) => {
                tracing::debug!(page, count = page_books.len(), "page parsed");
                books.extend(page_books);
            }
            Err(err) => {
                tracing::warn!(page, error = %err, "page failed; skipping");
            }
        }
    }

    books
}

async fn scrape_page(
    client: &reqwest::Client,
    url: &str,
    link_base: &str,
) -> Result<Vec<BookRecord>, PageError> {
    let html = fetch_page(client, url).await?;
    extract_books(&html, link_base).map_err(|source| PageError::Extract {
        url: url.to_owned(),
        source,
    })
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, PageError> {
    let fetch_err = |source: reqwest::Error| PageError::Fetch {
        url: url.to_owned(),
        source,
    };

    let response = client
        .get(url)
        .header(USER_AGENT, concat!("bookshelf/", env!("CARGO_PKG_VERSION")))
        .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .map_err(fetch_err)?;

    let status = response.status();
    if !status.is_success() {
        return Err(PageError::Status {
            url: url.to_owned(),
            status,
        });
    }

    response.text().await.map_err(fetch_err)
}

fn log_summary(books: &[BookRecord]) {
    let count = books.len() as f64;
    let mean_price = books.iter().map(|b| b.price).sum::<f64>() / count;
    let mean_rating = books.iter().map(|b| f64::from(b.rating)).sum::<f64>() / count;
    tracing::info!(
        records = books.len(),
        mean_price = %format!("{mean_price:.2}"),
        mean_rating = %format!("{mean_rating:.2}"),
        "summary"
    );

    for book in books.iter().take(SAMPLE_SIZE) {
        tracing::info!(
            title = %book.title,
            price = book.price,
            rating = book.rating,
            "sample"
        );
    }
}
