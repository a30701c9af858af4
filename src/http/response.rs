//! Response envelopes.
//!
//! Local and forwarded requests produce the same shapes, so a caller cannot tell
//! from the body which node did the parsing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::parsing::{Format, ParseResult, Record};

/// `GET /` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub available_sets: Vec<String>,
    pub available_formats: Vec<Format>,
}

/// `GET /parse/{set}/{format}` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResponse {
    pub set: String,
    pub format: Format,
    pub data: Record,
}

/// `GET /parse/{set}` payload: per-format record or inline `{"error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseAllResponse {
    pub set: String,
    pub data: Map<String, Value>,
}

impl ParseAllResponse {
    /// Build the aggregate from per-format outcomes, keeping their order.
    pub fn from_outcomes(set: &str, outcomes: Vec<(Format, ParseResult<Record>)>) -> Self {
        let data = outcomes
            .into_iter()
            .map(|(format, outcome)| {
                let value = match outcome {
                    Ok(record) => Value::Object(record),
                    Err(e) => json!({ "error": e.to_string() }),
                };
                (format.to_string(), value)
            })
            .collect();

        Self {
            set: set.to_string(),
            data,
        }
    }
}
