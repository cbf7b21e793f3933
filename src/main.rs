use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use papers::api::create_router;
use papers::cli::Cli;
use papers::config::Config;
use papers::eutils::EutilsClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    cli.apply(&mut config);

    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .init();

    let eutils = EutilsClient::new(&config.eutils_base_url, config.eutils_timeout)?;
    log::info!("Using E-utilities at {}", eutils.base_url());

    let app = create_router(Arc::new(eutils));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    log::info!("Server running at http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
