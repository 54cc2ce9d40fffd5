//! Cat API gateway library.
//!
//! A thin REST backend that forwards each inbound call to a single upstream
//! image/voting API and hands the upstream body back unchanged.

pub mod config;
pub mod dispatch;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod net;
pub mod observability;
pub mod resilience;

pub use config::schema::GatewayConfig;
pub use dispatch::{Dispatcher, HttpDispatcher, OutboundRequest, Outcome, RecordingDispatcher};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
