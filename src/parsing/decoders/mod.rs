//! Format decoders.
//!
//! Each decoder maps the raw bytes of an existing file to a [`Record`] or a
//! `ParseError::Decode`. Existence checks and format validation happen upstream.

pub mod csv;
pub mod json;
pub mod txt;
pub mod xml;
pub mod yaml;

use serde_json::Value;

use crate::parsing::types::{Format, ParseError, ParseResult, Record};

/// Decode `bytes` with the decoder that matches `format`.
pub fn decode(format: Format, bytes: &[u8]) -> ParseResult<Record> {
    match format {
        Format::Txt => txt::decode(bytes),
        Format::Xml => xml::decode(bytes),
        Format::Yaml => yaml::decode(bytes),
        Format::Json => json::decode(bytes),
        Format::Csv => csv::decode(bytes),
    }
}

/// Require a mapping at the document root of a structured format.
pub(crate) fn into_record(format: Format, value: Value) -> ParseResult<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::decode(
            format,
            format!("expected a mapping at the document root, found {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty document",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

/// Interpret bytes as UTF-8 text.
pub(crate) fn utf8(format: Format, bytes: &[u8]) -> ParseResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| ParseError::decode(format, e))
}
