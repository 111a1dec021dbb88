use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    bookshelf::logging::init(bookshelf::logging::CLI_DIRECTIVES).context("init logging")?;

    let cli = bookshelf::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        bookshelf::cli::Command::Scrape(args) => {
            bookshelf::crawl::run(args).await.context("scrape")?;
        }
    }

    Ok(())
}
