//! Lornu AI Ingress Gateway
//!
//! HTTP endpoint that creates LiveKit ingress sessions for streaming rooms
//! and clears them all on request.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use lornu_ingress::config::ServerArgs;
use lornu_ingress::{build_router, IngressGateway};

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();
    args.log.init_tracing()?;

    info!("Starting Lornu AI Ingress Gateway");

    let client = args.livekit.connect().await?;
    let gateway = IngressGateway::new(Arc::new(client));
    let app = build_router(gateway);

    info!(addr = %args.bind, "Ingress gateway listening");

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Ingress gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
