use trace_ledger::{
    api::Server,
    chain::BlockClock,
    config::Config,
    state::{Ledger, SharedLedger},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Entry point for the traceability ledger service.
///
/// Initializes logging, loads the configuration (path from the first CLI
/// argument, `config/default.toml` otherwise), starts the block clock in the
/// background and serves the JSON-RPC API.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/default.toml".to_string());
    let config = Config::load(&path)?;
    info!("Ledger starting with config: {:?}", config);

    let ledger = SharedLedger::new(Ledger::new(
        config.certification.owner.clone(),
        config.chain.start_height,
    ));

    let clock = BlockClock::new(ledger.clone(), config.chain.clone());
    tokio::spawn(async move {
        if let Err(e) = clock.start().await {
            tracing::error!("Block clock error: {:?}", e);
        }
    });

    let server = Server::new(config, ledger);
    server.start().await?;

    Ok(())
}
