use anyhow::{Context, Result};
use company_fields::{fetch, logging, service, Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = Config::load().context("loading configuration")?;
    let source = fetch::source_from_config(&config)?;
    let routes = service::routes(source, config.parse_mode, config.max_pairs);

    info!("Server starting on port {}", config.port);
    info!("Health check: http://localhost:{}/health", config.port);
    info!(
        "Fields endpoint: GET http://localhost:{}/fields?count=<n>",
        config.port
    );

    warp::serve(routes).run(([0, 0, 0, 0], config.port)).await;

    Ok(())
}
