//! Upstream dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! handler builds OutboundRequest(endpoint, method, payload)
//!     → Dispatcher::submit (returns a CompletionChannel immediately)
//!         → background task: resolve config, build `{base}/{endpoint}`,
//!           attach x-api-key + Content-Type, send
//!         → Outcome (upstream bytes | synthesized error) written once
//!     → resilience::timeouts races the channel against the deadline
//! ```
//!
//! # Design Decisions
//! - One background task and one upstream call per submit; no caching
//! - Every failure collapses to a synthesized `{"error": ...}` body; the
//!   `OutcomeKind` side channel keeps the distinction for logs and metrics
//! - The channel never blocks its producer, so abandoned calls clean up

pub mod channel;
pub mod dispatcher;
pub mod mock;
pub mod outcome;
pub mod request;

pub use channel::{completion_channel, Completion, CompletionChannel};
pub use dispatcher::{DispatchError, Dispatcher, HttpDispatcher, API_KEY_HEADER};
pub use mock::{RecordedCall, RecordingDispatcher};
pub use outcome::{Outcome, OutcomeKind};
pub use request::OutboundRequest;
