//! CSV decoder.
//!
//! The first line is the header. Only the first data row is returned; a file
//! with a header and no data rows decodes to an empty record.

use serde_json::Value;

use crate::parsing::types::{Format, ParseError, ParseResult, Record};

pub fn decode(bytes: &[u8]) -> ParseResult<Record> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers().map_err(error)?.clone();

    let row = match reader.records().next() {
        Some(row) => row.map_err(error)?,
        None => return Ok(Record::new()),
    };

    if row.len() != headers.len() {
        return Err(error(format!(
            "row 2: expected {} columns, got {}",
            headers.len(),
            row.len()
        )));
    }

    Ok(headers
        .iter()
        .zip(row.iter())
        .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
        .collect())
}

fn error(message: impl std::fmt::Display) -> ParseError {
    ParseError::decode(Format::Csv, message)
}
