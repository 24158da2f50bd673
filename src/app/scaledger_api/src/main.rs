use color_eyre::eyre;
use pg_store::connect_pool;
use scaledger_api::prelude::*;
use scaledger_api::{config, telemetry};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BINARY_NAME: &str = env!("CARGO_PKG_NAME");

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    config::load_dotenv()?;

    telemetry::init_tracing();

    let config = Config::builder().env().load()?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(main_async(config))
}

async fn main_async(config: Config) -> eyre::Result<()> {
    tracing::info!(version = VERSION, "Running {BINARY_NAME}");

    let pool = connect_pool(&config.pg_connection_options()).await?;

    let app = App::new(config, pool)?;

    app.run(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown requested");
}
