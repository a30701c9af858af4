//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::parsing::Format;

/// Root configuration for a parsing node.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NodeConfig {
    /// Identity and listener.
    pub node: NodeSection,

    /// Known sets and formats, and where their files live.
    pub catalog: CatalogConfig,

    /// The node that forwarded requests are relayed to.
    pub peer: PeerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Node identity and listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeSection {
    /// Name shown in the welcome payload.
    pub name: String,

    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for NodeSection {
    fn default() -> Self {
        Self {
            name: "format-relay".to_string(),
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Catalog of servable data.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding `<set>/<set>.<format>` files.
    pub data_root: PathBuf,

    /// Known set names.
    pub sets: Vec<String>,

    /// Enabled formats.
    pub formats: Vec<Format>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("data"),
            sets: vec!["books".to_string(), "movies".to_string()],
            formats: Format::ALL.to_vec(),
        }
    }
}

impl CatalogConfig {
    pub fn has_set(&self, set: &str) -> bool {
        self.sets.iter().any(|s| s == set)
    }

    pub fn has_format(&self, format: Format) -> bool {
        self.formats.contains(&format)
    }
}

/// Peer node configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PeerConfig {
    /// Base URL of the peer (e.g., "http://127.0.0.1:3000").
    pub base_url: String,

    /// Bound on a whole peer call, in seconds. Must be below `timeouts.request_secs`
    /// so a hung peer surfaces as a peer failure rather than a request timeout.
    pub timeout_secs: u64,
}

impl Default for PeerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
