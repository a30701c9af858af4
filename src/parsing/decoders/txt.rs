//! Plain `key: value` text decoder.
//!
//! Blank lines are skipped. Any other line must contain `": "`; the line is split
//! on the first occurrence and both sides are trimmed. A line without the
//! separator rejects the whole file.

use serde_json::Value;

use crate::parsing::decoders::utf8;
use crate::parsing::types::{Format, ParseError, ParseResult, Record};

const SEPARATOR: &str = ": ";

pub fn decode(bytes: &[u8]) -> ParseResult<Record> {
    let text = utf8(Format::Txt, bytes)?;
    let mut record = Record::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (key, value) = line.split_once(SEPARATOR).ok_or_else(|| {
            ParseError::decode(
                Format::Txt,
                format!("line {} has no \"{}\" separator: {:?}", idx + 1, SEPARATOR, line),
            )
        })?;

        record.insert(key.trim().to_string(), Value::String(value.trim().to_string()));
    }

    Ok(record)
}
