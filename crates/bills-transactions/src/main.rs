//! `bills` binary: the transaction service over HTTP.

use anyhow::Context as _;
use bills_config::{ConfigLoader, DEFAULT_ENV_PREFIX};
use bills_server::ShutdownSignal;
use bills_telemetry::init_logging;
use bills_transactions::storage::InMemoryStorage;
use bills_transactions::{build_server, ModuleBuilder};
use std::sync::Arc;

const CONFIG_FILE: &str = "bills.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new()
        .with_optional_file(CONFIG_FILE)?
        .with_dotenv()?
        .with_env_prefix(DEFAULT_ENV_PREFIX)
        .load()
        .context("loading configuration")?;

    init_logging(&config.log_config()).context("initializing logging")?;

    let provider = ModuleBuilder::new()
        .with_in_memory_storage(Arc::new(InMemoryStorage::new()))
        .build()?;
    let server = build_server(config.server_config(), &provider);

    tracing::info!(
        service = %config.service_name,
        routes = server.routes().count(),
        "starting transaction service"
    );

    Arc::new(server)
        .start(ShutdownSignal::with_os_signals())
        .await?;

    tracing::info!("transaction service stopped");
    Ok(())
}
