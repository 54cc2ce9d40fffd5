//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! CompletionChannel from the dispatcher
//!     → timeouts.rs (race outcome against the configured deadline)
//!     → Ok(Outcome) | Err(TimedOut)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every inbound call has a deadline
//! - One attempt per call: no retries, no circuit breaking

pub mod timeouts;

pub use timeouts::{await_with_deadline, TimedOut, DEFAULT_DEADLINE};
