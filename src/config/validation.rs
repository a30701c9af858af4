//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Set names must be safe single path segments
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Peer base URL must be an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: NodeConfig → Result<(), Vec<ValidationError>>
//! - The peer is never contacted here

use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::NodeConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &NodeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.node.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "node.bind_address",
            format!("'{}' is not a socket address", config.node.bind_address),
        ));
    }

    let catalog = &config.catalog;
    if catalog.sets.is_empty() {
        errors.push(ValidationError::new("catalog.sets", "at least one set is required"));
    }
    let mut seen = HashSet::new();
    for set in &catalog.sets {
        if !is_safe_segment(set) {
            errors.push(ValidationError::new(
                "catalog.sets",
                format!("'{}' is not a valid set name", set),
            ));
        }
        if !seen.insert(set.as_str()) {
            errors.push(ValidationError::new("catalog.sets", format!("duplicate set '{}'", set)));
        }
    }

    if catalog.formats.is_empty() {
        errors.push(ValidationError::new("catalog.formats", "at least one format is required"));
    }
    let mut seen = HashSet::new();
    for format in &catalog.formats {
        if !seen.insert(*format) {
            errors.push(ValidationError::new(
                "catalog.formats",
                format!("duplicate format '{}'", format),
            ));
        }
    }

    match url::Url::parse(&config.peer.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::new(
            "peer.base_url",
            format!("'{}' is not an absolute http(s) URL", config.peer.base_url),
        )),
    }
    if config.peer.timeout_secs == 0 {
        errors.push(ValidationError::new("peer.timeout_secs", "must be greater than zero"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    } else if config.peer.timeout_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::new(
            "peer.timeout_secs",
            format!(
                "must be less than timeouts.request_secs ({})",
                config.timeouts.request_secs
            ),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A set name is used as a directory and file stem, so it must stay one segment.
fn is_safe_segment(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control)
}
