//! Parse dispatcher.
//!
//! # Responsibilities
//! - Resolve `<data_root>/<set>/<set>.<format>` for a validated request
//! - Report a missing file as `ParseError::NotFound`
//! - Hand the bytes to the decoder for the format
//!
//! Set and format names are validated by the HTTP layer before dispatch.

use std::io::ErrorKind;
use std::path::PathBuf;

use futures_util::future::join_all;

use crate::config::CatalogConfig;
use crate::observability::metrics;
use crate::parsing::decoders;
use crate::parsing::types::{Format, ParseError, ParseResult, Record};

/// Resolves set files on disk and decodes them.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    data_root: PathBuf,
    formats: Vec<Format>,
}

impl Dispatcher {
    /// Create a dispatcher serving `formats` from files under `data_root`.
    pub fn new(data_root: impl Into<PathBuf>, formats: Vec<Format>) -> Self {
        Self {
            data_root: data_root.into(),
            formats,
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(&config.data_root, config.formats.clone())
    }

    /// Enabled formats, in enumeration order.
    pub fn formats(&self) -> Vec<Format> {
        Format::ALL
            .into_iter()
            .filter(|f| self.formats.contains(f))
            .collect()
    }

    /// Location of the file backing `(set, format)`.
    pub fn path_for(&self, set: &str, format: Format) -> PathBuf {
        self.data_root
            .join(set)
            .join(format!("{}.{}", set, format.as_str()))
    }

    /// Parse one set file.
    pub async fn parse(&self, set: &str, format: Format) -> ParseResult<Record> {
        let result = self.parse_inner(set, format).await;
        metrics::record_parse(format, &result);
        result
    }

    async fn parse_inner(&self, set: &str, format: Format) -> ParseResult<Record> {
        if !self.formats.contains(&format) {
            return Err(ParseError::UnsupportedFormat(format));
        }

        let path = self.path_for(set, format);
        tracing::debug!(path = %path.display(), %format, "Reading set file");

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ParseError::NotFound(path)),
            Err(source) => return Err(ParseError::Read { path, source }),
        };

        decoders::decode(format, &bytes)
    }

    /// Parse every enabled format of a set concurrently.
    ///
    /// Outcomes are returned in enumeration order regardless of completion order.
    pub async fn parse_all(&self, set: &str) -> Vec<(Format, ParseResult<Record>)> {
        let formats = self.formats();
        let outcomes = join_all(formats.iter().map(|&format| self.parse(set, format))).await;
        formats.into_iter().zip(outcomes).collect()
    }
}
