//! Format-dispatch parsing subsystem.
//!
//! # Data Flow
//! ```text
//! (set, format)
//!     → dispatcher.rs (resolve <data_root>/<set>/<set>.<format>, read bytes)
//!     → decoders/ (txt | xml | yaml | json | csv, picked by Format variant)
//!     → Record (ordered field → value mapping)
//! ```
//!
//! # Design Decisions
//! - Format is a closed enum; dispatch is a single `match`, shared by every
//!   request path so local and peer nodes cannot drift apart
//! - Decoders are pure functions over bytes; only the dispatcher touches disk
//! - Failures are values (`ParseError`), mapped to HTTP statuses in `http::error`

pub mod decoders;
pub mod dispatcher;
pub mod types;

pub use dispatcher::Dispatcher;
pub use types::{Format, ParseError, ParseResult, Record, UnknownFormat};
