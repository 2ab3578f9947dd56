use std::path::PathBuf;

use clap::Parser;
use renshuu_connect::{
    core::config::Overrides,
    server,
    Config,
};
use tracing_subscriber::EnvFilter;

/// Lets AnkiConnect-speaking flashcard tools add words to renshuu.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (defaults to config.json in the local data directory)
    #[arg(long, env = "RENSHUU_CONNECT_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "RENSHUU_CONNECT_HOST")]
    host: Option<String>,

    #[arg(long, env = "RENSHUU_CONNECT_PORT")]
    port: Option<u16>,

    /// renshuu API root, e.g. https://api.renshuu.org/v1/
    #[arg(long, env = "RENSHUU_CONNECT_BASE_URL")]
    base_url: Option<String>,

    /// Seconds before an outbound call is abandoned
    #[arg(long, env = "RENSHUU_CONNECT_TIMEOUT")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = Overrides {
        host: cli.host,
        port: cli.port,
        base_url: cli.base_url,
        request_timeout_secs: cli.timeout,
    };
    let config = Config::load(cli.config, overrides);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    server::serve(&config).await?;
    Ok(())
}
