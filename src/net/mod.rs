//! Network layer subsystem.
//!
//! Plain TCP listeners are bound directly with Tokio; this module only holds
//! the optional TLS setup used by `HttpServer::run_tls`.

pub mod tls;
