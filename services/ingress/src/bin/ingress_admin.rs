//! Ingress Admin CLI
//!
//! Operator tool for LiveKit ingress sessions, built on the same gateway
//! as the HTTP endpoint.
//!
//! # Usage
//! ```bash
//! # List ingresses
//! ingress-admin list
//!
//! # Create an RTMP ingress for a room
//! ingress-admin create --room-slug studio-a --streamer-name "Alex"
//!
//! # Create a WHIP ingress (transcoding bypassed)
//! ingress-admin create --room-slug studio-a --streamer-name "Alex" --whip
//!
//! # Delete one ingress
//! ingress-admin delete --ingress-id IN_abc123
//!
//! # Delete every ingress visible to the API key
//! ingress-admin delete-all --yes
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{info, warn};

use lornu_ingress::config::{LiveKitArgs, LogArgs};
use lornu_ingress::{CreateIngressRequest, IngressClient, IngressGateway};

// ============================================================
// CLI Definition
// ============================================================

#[derive(Parser)]
#[command(name = "ingress-admin")]
#[command(about = "Lornu AI LiveKit Ingress Admin", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    livekit: LiveKitArgs,

    #[command(flatten)]
    log: LogArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all ingresses
    List,

    /// Create an ingress for a room
    Create {
        /// Room slug (also used as ingress name and participant identity)
        #[arg(long)]
        room_slug: String,

        /// Streamer display name
        #[arg(long)]
        streamer_name: String,

        /// Use WHIP input instead of RTMP
        #[arg(long)]
        whip: bool,
    },

    /// Delete one ingress
    Delete {
        /// Ingress ID to delete
        #[arg(long)]
        ingress_id: String,
    },

    /// Delete every ingress
    DeleteAll {
        /// Confirm the bulk delete
        #[arg(long)]
        yes: bool,
    },
}

// ============================================================
// Main Entry Point
// ============================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.log.init_tracing()?;

    let client = Arc::new(cli.livekit.connect().await?);
    let gateway = IngressGateway::new(client.clone());

    match cli.command {
        Commands::List => {
            let ingresses = gateway.list().await?;

            println!("\n{:<20} {:<24} {:<24} {:<12}", "ID", "NAME", "ROOM", "INPUT");
            println!("{}", "-".repeat(82));

            for ingress in &ingresses {
                println!(
                    "{:<20} {:<24} {:<24} {:<12}",
                    ingress.id().unwrap_or("-"),
                    truncate(ingress.name.as_deref().unwrap_or("-"), 24),
                    truncate(ingress.room_name.as_deref().unwrap_or("-"), 24),
                    ingress.input_type_label()
                );
            }

            info!("Listed {} ingresses", ingresses.len());
        }

        Commands::Create { room_slug, streamer_name, whip } => {
            let request = CreateIngressRequest::new(room_slug, streamer_name, whip);
            let ingress = gateway.create(&request).await?;

            println!("Created ingress: {}", ingress.id().unwrap_or("-"));
            if let Some(url) = &ingress.url {
                println!("  URL:        {}", url);
            }
            if let Some(key) = &ingress.stream_key {
                println!("  Stream key: {}", key);
            }
        }

        Commands::Delete { ingress_id } => {
            warn!("Deleting ingress: {}", ingress_id);
            client.delete_ingress(&ingress_id).await?;
            println!("Deleted ingress: {}", ingress_id);
        }

        Commands::DeleteAll { yes } => {
            if !yes {
                bail!("Refusing to delete every ingress without --yes");
            }

            warn!("Deleting all ingresses");
            let deleted = gateway.delete_all().await?;
            println!("Deleted {} ingresses", deleted);
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let head: String = s.chars().take(max - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}
