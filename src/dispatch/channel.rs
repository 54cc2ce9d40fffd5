//! One-shot completion channel.
//!
//! Backed by a bounded mpsc channel of capacity 1. The producing half is
//! consumed by its single write, so the slot is always free when the write
//! happens and a receiver that stopped listening can never stall the
//! producer. Once the value is read, further reads observe end-of-stream.

use tokio::sync::mpsc;

use crate::dispatch::outcome::Outcome;

/// Create a fresh producer/consumer pair for one request.
pub fn completion_channel() -> (Completion, CompletionChannel) {
    let (tx, rx) = mpsc::channel(1);
    (Completion { tx }, CompletionChannel { rx })
}

/// Producing half. Delivers exactly one [`Outcome`].
#[derive(Debug)]
pub struct Completion {
    tx: mpsc::Sender<Outcome>,
}

impl Completion {
    /// Deliver the outcome and close the channel.
    ///
    /// Never waits. Returns `false` when the receiver is already gone, in
    /// which case the outcome is dropped.
    pub fn complete(self, outcome: Outcome) -> bool {
        self.tx.try_send(outcome).is_ok()
    }
}

/// Consuming half, handed back to the caller of `submit`.
#[derive(Debug)]
pub struct CompletionChannel {
    rx: mpsc::Receiver<Outcome>,
}

impl CompletionChannel {
    /// A channel that already holds `outcome`.
    pub fn ready(outcome: Outcome) -> Self {
        let (completion, channel) = completion_channel();
        completion.complete(outcome);
        channel
    }

    /// Wait for the outcome. `None` once the value has been taken, or when
    /// the producer went away without writing.
    pub async fn recv(&mut self) -> Option<Outcome> {
        self.rx.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_single_value_then_end_of_stream() {
        let (completion, mut channel) = completion_channel();
        assert!(completion.complete(Outcome::upstream("ok")));

        let first = channel.recv().await.unwrap();
        assert_eq!(first.bytes().as_ref(), b"ok");
        assert!(channel.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_late_write_after_receiver_dropped_does_not_block() {
        let (completion, channel) = completion_channel();
        drop(channel);

        assert!(!completion.complete(Outcome::upstream("late")));
    }

    #[tokio::test]
    async fn test_producer_dropped_without_value() {
        let (completion, mut channel) = completion_channel();
        drop(completion);
        assert!(channel.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_ready_channel() {
        let mut channel = CompletionChannel::ready(Outcome::invalid_method());
        assert_eq!(channel.recv().await.unwrap(), Outcome::invalid_method());
    }
}
