//! Core parsing types and error definitions.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical decoded content of one file.
///
/// Field order follows the source document. Values are strings for the flat
/// formats (txt, csv, xml) and may be any JSON-like structure for yaml/json.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// On-disk serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Txt,
    Xml,
    Yaml,
    Json,
    Csv,
}

impl Format {
    /// Every format, in the order aggregate responses are assembled.
    pub const ALL: [Format; 5] = [Format::Txt, Format::Xml, Format::Yaml, Format::Json, Format::Csv];

    /// File extension (and URL segment) for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Txt => "txt",
            Format::Xml => "xml",
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Csv => "csv",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown format: {0}")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Errors that can occur while resolving or decoding a set file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No file exists for the requested (set, format).
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file exists but is not valid for its format.
    #[error("Error parsing {format} file: {message}")]
    Decode { format: Format, message: String },

    /// The format is not enabled on this node.
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(Format),

    /// The file exists but could not be read.
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub fn decode(format: Format, message: impl fmt::Display) -> Self {
        ParseError::Decode {
            format,
            message: message.to_string(),
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
