//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, tracing, timeout)
//!     → handlers.rs (validate, pick local or forwarded path)
//!     → parsing::Dispatcher | peer::PeerClient
//!     → response.rs envelopes, or error.rs {"detail": ...} bodies
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use request::{request_id, UuidRequestId, X_REQUEST_ID};
pub use response::{ParseAllResponse, ParseResponse, WelcomeResponse};
pub use server::{AppState, HttpServer};
