use anyhow::Context;
use clap::Args;

use crate::config::AppConfig;

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT / GATEWAY_PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Address to bind (default 0.0.0.0)")]
    pub bind: Option<String>,
}

pub async fn handle(args: ServeArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }

    match config.resolve_base() {
        Ok(base) => tracing::info!("Proxying to backend at {}", base),
        // Keep serving: data routes answer 500 with a configuration error
        Err(e) => tracing::warn!("{}", e),
    }
    tracing::info!("Starting admin gateway in {:?} mode", config.environment);

    let bind_addr = format!("{}:{}", args.bind.as_deref().unwrap_or("0.0.0.0"), config.server.port);
    let state = crate::app::AppState::new(config).context("failed to build upstream HTTP client")?;
    let app = crate::app::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Admin gateway listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
