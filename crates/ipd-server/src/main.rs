use anyhow::Context;
use ipd_core::DashboardService;
use ipd_server::{cli, routes, telemetry};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli::command().get_matches();
    telemetry::init(matches.get_flag("log-json"))?;

    let config = cli::load_config(&matches)?;
    let addr = config.bind_addr();
    let service = Arc::new(DashboardService::new(config));

    let (bound, server) = warp::serve(routes(service))
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
        })
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(%bound, "dashboard listening");
    tracing::info!("endpoints: GET /, POST /predict, GET /historical_data, GET /model_info, GET /feature_importance, GET /health");
    tracing::warn!("serving mock predictions; no inference backend is wired in");

    server.await;
    tracing::info!("dashboard stopped");
    Ok(())
}
