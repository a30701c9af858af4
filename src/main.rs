//! Format relay node.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  NODE                        │
//!   GET /parse/...       │  ┌────────┐   ┌──────────┐                   │
//!   ─────────────────────┼─▶│  http  │──▶│ handlers │──direct=true──┐   │
//!                        │  │ server │   │ validate │               ▼   │
//!                        │  └────────┘   └────┬─────┘        ┌──────────┐│
//!                        │                    │direct=false  │ parsing  ││──▶ <data_root>/
//!                        │                    ▼              │dispatcher││
//!                        │              ┌──────────┐         └──────────┘│
//!                        │              │   peer   │─────────────────────┼──▶ peer node
//!                        │              │  client  │  ?direct=true       │
//!                        │              └──────────┘                     │
//!                        └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use format_relay::config::{load_config, ConfigError, NodeConfig};
use format_relay::http::HttpServer;
use format_relay::lifecycle::Shutdown;
use format_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "format-relay")]
#[command(about = "Serve data sets in five formats, locally or through a peer", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override node.bind_address.
    #[arg(long)]
    bind: Option<String>,

    /// Override peer.base_url.
    #[arg(long)]
    peer_url: Option<String>,

    /// Override catalog.data_root.
    #[arg(long)]
    data_root: Option<PathBuf>,

    /// Override node.name.
    #[arg(long)]
    name: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<NodeConfig, ConfigError> {
        let Cli {
            config,
            bind,
            peer_url,
            data_root,
            name,
        } = self;

        load_config(config.as_deref(), |loaded| {
            if let Some(bind) = bind {
                loaded.node.bind_address = bind;
            }
            if let Some(url) = peer_url {
                loaded.peer.base_url = url;
            }
            if let Some(root) = data_root {
                loaded.catalog.data_root = root;
            }
            if let Some(name) = name {
                loaded.node.name = name;
            }
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_level);
    tracing::info!("format-relay v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        node = %config.node.name,
        bind_address = %config.node.bind_address,
        data_root = %config.catalog.data_root.display(),
        peer = %config.peer.base_url,
        sets = ?config.catalog.sets,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.node.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
