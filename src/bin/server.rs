use std::sync::Arc;

use anyhow::Context;
use log::{error, info, warn};

use loto::env_config;
use loto::ingest::{current_rules, load_all_draws};
use loto::server::{create_router, ServerContext};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_config::init_logging();
    let _base = env_config::init_base_path();
    let port = env_config::server_port();
    let data_path = env_config::data_path();
    info!("Starting loto API server...");

    let all_draws = match load_all_draws(&data_path) {
        Ok(draws) => draws,
        Err(e) => {
            error!("Could not load draw history from {}: {e}", data_path.display());
            Vec::new()
        }
    };
    let draws = current_rules(&all_draws);
    info!(
        "{} of {} draws follow the current rules",
        draws.len(),
        all_draws.len()
    );
    if draws.is_empty() {
        warn!("Draw history is empty; every evaluation will report zero totals");
    }

    let ctx = Arc::new(ServerContext {
        draws: Arc::new(draws),
        all_draws: Arc::new(all_draws),
        search: env_config::search_config(),
    });
    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("bind port {port}"))?;
    info!("Server is running on port {}. Press Ctrl+C to stop.", port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    info!("Stopping server...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to install CTRL+C signal handler: {e}");
        std::future::pending::<()>().await;
    }
}
