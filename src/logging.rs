use std::io::IsTerminal as _;

use anyhow::Context as _;

/// Default filter for the `bookshelf` CLI.
pub const CLI_DIRECTIVES: &str = "info";
/// Default filter for the API server; includes per-request spans from `tower_http`.
pub const SERVER_DIRECTIVES: &str = "info,tower_http=debug";

/// Installs the global subscriber on stderr. `RUST_LOG` overrides `default_directives`.
pub fn init(default_directives: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_directives))
        .context("build log filter")?;

    let stderr = std::io::stderr();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(stderr.is_terminal())
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
