//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML), optional
//!     → loader.rs (parse & deserialize)
//!     → CLI overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → NodeConfig (validated, immutable)
//!     → shared via Arc with the dispatcher, peer client and handlers
//! ```
//!
//! # Design Decisions
//! - All fields have defaults, so a node runs with no config file
//! - Known sets, formats and the peer URL live here, never in globals
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{CatalogConfig, NodeConfig, NodeSection, ObservabilityConfig, PeerConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
