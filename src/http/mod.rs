//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, access-log span)
//!     → handlers/ (local validation and defaulting)
//!     → dispatch + resilience (one upstream call, bounded wait)
//!     → response.rs (outcome bytes or {"error": ...}, always 200 JSON)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
