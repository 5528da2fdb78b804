//! steambridge probe entry point.
//!
//! Usage: `steambridge-probe [CONFIG_PATH]`

mod config;
mod report;

use anyhow::Context;
use steambridge::Client;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let (config, path) = config::Config::load(std::env::args_os().nth(1).map(Into::into))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %path.display(),
        "starting steambridge probe"
    );

    let client = Client::load(config.client_options()).context("loading the Steam library")?;
    client.init().context("initialising the Steam API")?;

    let rt = tokio::runtime::Runtime::new()?;
    let report = rt.block_on(report::collect(&client, config.leaderboard.as_deref()));
    client.shutdown();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
