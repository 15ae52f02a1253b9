use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use frontdesk_channels::{BridgeChannel, Channel, LogChannel};
use frontdesk_core::config::FrontdeskConfig;

mod app;
mod heartbeat;
mod http;
mod shutdown;

#[derive(Parser, Debug)]
#[command(name = "frontdesk-gateway")]
#[command(about = "WhatsApp front-desk menu router")]
#[command(version)]
struct Cli {
    /// Path to frontdesk.toml (default: ~/.frontdesk/frontdesk.toml)
    #[arg(long, env = "FRONTDESK_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "frontdesk_gateway=info,frontdesk_sessions=info,frontdesk_channels=info,tower_http=debug"
                    .into()
            }),
        )
        .init();

    let cli = Cli::parse();

    // load config: --config > FRONTDESK_CONFIG env > ~/.frontdesk/frontdesk.toml
    // a missing file yields defaults; a malformed one stops startup
    let config = FrontdeskConfig::load(cli.config.as_deref()).context("loading config")?;

    let channel = build_channel(&config)?;
    info!(
        channel = channel.name(),
        expiry_secs = config.sessions.expiry_secs,
        organization = %config.bot.organization,
        "session engine ready"
    );

    let bind = config.gateway.bind.clone();
    let port = config.gateway.port;
    let heartbeat = config.heartbeat.clone();

    let state = Arc::new(app::AppState::new(config, channel));
    let router = app::build_router(Arc::clone(&state));

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        shutdown::signal().await;
        let _ = shutdown_tx.send(true);
    });

    let heartbeat_task = heartbeat.enabled.then(|| {
        tokio::spawn(heartbeat::serve(
            bind.clone(),
            heartbeat.port,
            shutdown_rx.clone(),
        ))
    });

    let addr: SocketAddr = format!("{}:{}", bind, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding gateway to {addr}"))?;
    info!("Frontdesk gateway listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown::wait(shutdown_rx))
        .await?;

    if let Some(task) = heartbeat_task {
        let _ = task.await;
    }
    info!(sessions = state.engine.store().len(), "gateway stopped");
    Ok(())
}

/// Replies go to the bridge when `[bridge]` is configured, otherwise to the log.
fn build_channel(config: &FrontdeskConfig) -> anyhow::Result<app::DynChannel> {
    match &config.bridge {
        Some(bridge) => {
            let channel = BridgeChannel::new(bridge).context("invalid [bridge] configuration")?;
            info!(endpoint = %channel.endpoint(), "sending replies through the bridge");
            Ok(Arc::new(channel))
        }
        None => {
            tracing::warn!("no [bridge] configured, replies will only be logged");
            Ok(Arc::new(LogChannel))
        }
    }
}
