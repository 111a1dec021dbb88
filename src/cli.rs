use clap::{Args, Parser, Subcommand};

pub const DEFAULT_URL_TEMPLATE: &str = "http://books.toscrape.com/catalogue/page-{page}.html";
pub const DEFAULT_LINK_BASE: &str = "http://books.toscrape.com/catalogue/";

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Crawl the catalog and replace the local dataset.
    Scrape(ScrapeArgs),
}

#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// Number of catalog pages to fetch, starting at page 1.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Installation root; the dataset is written under `<root>/data/`.
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Dataset file name inside `<root>/data/`.
    #[arg(long, default_value = "books.csv")]
    pub output: String,

    /// Catalog page URL; `{page}` is replaced by the page number.
    #[arg(long, default_value = DEFAULT_URL_TEMPLATE)]
    pub url_template: String,

    /// Prefix joined (as plain text) with each listing's relative href.
    #[arg(long, default_value = DEFAULT_LINK_BASE)]
    pub link_base: String,

    /// Per-page request timeout.
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Delay between successive page fetches (politeness).
    #[arg(long, default_value_t = 500)]
    pub delay_ms: u64,
}
