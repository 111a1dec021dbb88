use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use bookshelf::api::store::CsvBookStore;
use bookshelf::api::{AppState, router};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "0.0.0.0:8000")]
    addr: SocketAddr,

    /// Installation root; books are read from `<root>/data/books.csv`.
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    bookshelf::logging::init(bookshelf::logging::SERVER_DIRECTIVES)?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting bookshelf-api");

    let store = CsvBookStore::from_root(&args.root);
    tracing::info!(dataset = %store.path().display(), "serving books");
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve http")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(?err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
