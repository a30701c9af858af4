//! YAML decoder.
//!
//! Plain `serde_yaml` deserialization: no custom tags are evaluated.

use serde_json::Value;

use crate::parsing::decoders::into_record;
use crate::parsing::types::{Format, ParseError, ParseResult, Record};

pub fn decode(bytes: &[u8]) -> ParseResult<Record> {
    let value: Value = serde_yaml::from_slice(bytes).map_err(|e| ParseError::decode(Format::Yaml, e))?;
    into_record(Format::Yaml, value)
}
