//! JSON decoder.

use serde_json::Value;

use crate::parsing::decoders::into_record;
use crate::parsing::types::{Format, ParseError, ParseResult, Record};

pub fn decode(bytes: &[u8]) -> ParseResult<Record> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ParseError::decode(Format::Json, e))?;
    into_record(Format::Json, value)
}
