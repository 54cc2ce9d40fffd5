//! Timeout enforcement for dispatched calls.
//!
//! # Responsibilities
//! - Race a completion channel against a fixed deadline
//! - Always terminate with either the outcome or a timeout signal
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timing out only stops the wait; the background call is not aborted and
//!   its late outcome is discarded by the channel
//! - Timeouts are a distinct error, not a synthesized outcome; the response
//!   layer decides how to render them

use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;

use crate::dispatch::{CompletionChannel, Outcome};

/// Deadline used when none is configured.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(10);

/// The deadline elapsed before the outcome arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("request timed out after {0:?}")]
pub struct TimedOut(pub Duration);

/// Wait for the channel's single outcome, giving up after `deadline`.
///
/// A producer that disappears without writing counts as a transport failure.
pub async fn await_with_deadline(
    mut channel: CompletionChannel,
    deadline: Duration,
) -> Result<Outcome, TimedOut> {
    match timeout(deadline, channel.recv()).await {
        Ok(Some(outcome)) => Ok(outcome),
        Ok(None) => {
            tracing::error!("Dispatch ended without producing an outcome");
            Ok(Outcome::transport_failure())
        }
        Err(_) => {
            tracing::warn!(deadline = ?deadline, "Upstream call exceeded deadline");
            Err(TimedOut(deadline))
        }
    }
}
