//! Format relay: serves named data sets from txt/xml/yaml/json/csv files as one
//! normalized JSON shape, parsing locally or relaying to a peer node.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod parsing;
pub mod peer;

pub use config::NodeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use parsing::{Dispatcher, Format, ParseError, Record};
pub use peer::{PeerClient, PeerError};
