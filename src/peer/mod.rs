//! Peer forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! handler (direct=false)
//!     → client.rs (GET <peer>/parse/<set>[/<format>]?direct=true)
//!     → peer node serves it locally
//!     → raw JSON body relayed to the caller, or a classified PeerError
//! ```
//!
//! # Design Decisions
//! - No retries; failures surface immediately
//! - Forwarded requests always carry direct=true so they never bounce back
//! - Transport failures and peer-reported errors are distinct variants

pub mod client;

pub use client::{PeerClient, PeerError};
