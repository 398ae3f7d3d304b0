use miette::{IntoDiagnostic, Result};
use pos_gateway::config::Config;
use pos_gateway::interfaces::http::create_app;
use pos_gateway::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load();
    telemetry::init(config.log_format);

    let gateway = Arc::new(config.build_gateway());
    if !config.simulation {
        tracing::warn!("simulation mode is off; the live gateway is not implemented and every payment will fail");
    }

    let app = create_app(gateway);

    let addr = config.addr();
    let listener = TcpListener::bind(addr).await.into_diagnostic()?;
    tracing::info!(
        %addr,
        latency_percent = config.latency_percent,
        "payment gateway listening"
    );

    axum::serve(listener, app).await.into_diagnostic()?;

    Ok(())
}
