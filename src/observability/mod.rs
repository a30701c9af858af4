//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and dispatcher produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```
//!
//! # Design Decisions
//! - Request ID flows from the HTTP layer into forwarded peer calls
//! - Metrics are cheap (atomic increments); without an exporter they are no-ops

pub mod logging;
pub mod metrics;
