//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): requests by mode, status
//! - `relay_request_duration_seconds` (histogram): latency by mode
//! - `relay_parse_total` (counter): local parse attempts by format, outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::parsing::{Format, ParseError, ParseResult, Record};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished HTTP request.
pub fn record_request(mode: &'static str, status: u16, start: Instant) {
    counter!("relay_requests_total", "mode" => mode, "status" => status.to_string()).increment(1);
    histogram!("relay_request_duration_seconds", "mode" => mode).record(start.elapsed().as_secs_f64());
}

/// Record one local parse attempt.
pub fn record_parse(format: Format, result: &ParseResult<Record>) {
    counter!("relay_parse_total", "format" => format.as_str(), "outcome" => outcome(result)).increment(1);
}

fn outcome(result: &ParseResult<Record>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(ParseError::NotFound(_)) => "not_found",
        Err(ParseError::Decode { .. }) => "decode_error",
        Err(ParseError::UnsupportedFormat(_)) => "unsupported",
        Err(ParseError::Read { .. }) => "read_error",
    }
}
