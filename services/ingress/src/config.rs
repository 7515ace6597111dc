//! Configuration
//!
//! Command-line flags with environment fallbacks, shared by the API server
//! and the admin CLI.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::livekit::LiveKitIngressClient;

/// LiveKit connection settings
#[derive(Args, Debug, Clone)]
pub struct LiveKitArgs {
    /// LiveKit host (https://, http://, wss:// or ws://)
    #[arg(long, env = "LIVEKIT_URL")]
    pub livekit_url: String,

    /// LiveKit API key
    #[arg(long, env = "LIVEKIT_API_KEY")]
    pub api_key: String,

    /// LiveKit API secret (falls back to Secret Manager when unset)
    #[arg(long, env = "LIVEKIT_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// GCP Project ID for Secret Manager
    #[arg(long, env = "GCP_PROJECT_ID")]
    pub gcp_project: Option<String>,

    /// Secret name holding the LiveKit API secret
    #[arg(long, env = "LIVEKIT_SECRET_ID", default_value = "livekit-api-secret")]
    pub secret_name: String,
}

impl LiveKitArgs {
    /// API secret from flags/env, otherwise from Secret Manager
    pub async fn resolve_secret(&self) -> Result<String> {
        if let Some(secret) = self.api_secret.as_deref().filter(|s| !s.is_empty()) {
            return Ok(secret.to_string());
        }

        match &self.gcp_project {
            Some(project) => fetch_secret(project, &self.secret_name).await,
            None => bail!("LiveKit API secret not configured: set LIVEKIT_API_SECRET or GCP_PROJECT_ID"),
        }
    }

    pub async fn connect(&self) -> Result<LiveKitIngressClient> {
        let secret = self.resolve_secret().await?;
        let client = LiveKitIngressClient::new(&self.livekit_url, self.api_key.clone(), secret)
            .context("Failed to create LiveKit client")?;
        info!(url = client.base_url(), "LiveKit client ready");
        Ok(client)
    }
}

#[cfg(feature = "gsm")]
async fn fetch_secret(project: &str, secret_name: &str) -> Result<String> {
    let sm = crate::secrets::SecretManager::new(project).await?;
    sm.latest(secret_name)
        .await
        .context("Failed to fetch LiveKit API secret from GSM")
}

#[cfg(not(feature = "gsm"))]
async fn fetch_secret(_project: &str, _secret_name: &str) -> Result<String> {
    bail!("Built without the `gsm` feature: set LIVEKIT_API_SECRET instead")
}

/// Logging settings
#[derive(Args, Debug, Clone, Default)]
pub struct LogArgs {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON log lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl LogArgs {
    /// Install the global tracing subscriber. `RUST_LOG` overrides the level.
    pub fn init_tracing(&self) -> Result<()> {
        let level = if self.verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false);

        let result = if self.log_json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
        result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
    }
}

/// Lornu AI Ingress Gateway - LiveKit ingress provisioning
#[derive(Parser, Debug)]
#[command(name = "ingress-api", version, about, long_about = None)]
pub struct ServerArgs {
    #[command(flatten)]
    pub livekit: LiveKitArgs,

    /// Address to listen on
    #[arg(long, env = "INGRESS_BIND_ADDR", default_value = "0.0.0.0:8083")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub log: LogArgs,
}
