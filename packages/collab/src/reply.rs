//! One-shot reply channel.
//!
//! Each submitted input gets exactly one reply slot. The sender half is
//! consumed by `complete`, so a second completion is unrepresentable; the
//! receiver half always resolves to a payload — the real one, a timeout
//! error, or an internal error when the session died mid-turn.

use atelier_core::{Payload, RequestId};
use std::time::Duration;
use tokio::sync::oneshot;

/// Session-side half: completes the reply exactly once.
pub struct ReplySender {
    request_id: RequestId,
    tx: oneshot::Sender<Payload>,
}

/// Caller-side half: awaits the single reply.
pub struct ReplySlot {
    request_id: RequestId,
    rx: oneshot::Receiver<Payload>,
}

/// Create a reply channel correlated with one request id.
pub fn reply_channel(request_id: RequestId) -> (ReplySender, ReplySlot) {
    let (tx, rx) = oneshot::channel();
    (
        ReplySender {
            request_id: request_id.clone(),
            tx,
        },
        ReplySlot { request_id, rx },
    )
}

impl ReplySender {
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Deliver the payload. Consuming `self` makes double completion a
    /// compile error rather than a runtime hazard. If the caller already
    /// gave up (dropped the slot or timed out), the payload comes back as
    /// `Err` so the session can log the discarded result.
    pub fn complete(self, payload: Payload) -> Result<(), Payload> {
        self.tx.send(payload)
    }
}

impl ReplySlot {
    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Wait for the reply, yielding a timeout error payload when the turn
    /// does not complete in time. The turn itself still runs to completion;
    /// its result is simply discarded.
    pub async fn await_reply(self, timeout: Duration) -> Payload {
        match tokio::time::timeout(timeout, self.rx).await {
            Ok(Ok(payload)) => payload,
            Ok(Err(_)) => Payload::error(
                self.request_id,
                "internal error: reply channel closed before completion",
            ),
            Err(_) => Payload::error(self.request_id, "timed out waiting for reply"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_complete_then_await() {
        let (tx, rx) = reply_channel(RequestId::from("req"));
        tx.complete(Payload::success(RequestId::from("req"))).unwrap();

        let payload = rx.await_reply(Duration::from_secs(1)).await;
        assert!(payload.is_success());
        assert_eq!(payload.request_id(), &RequestId::from("req"));
    }

    #[tokio::test]
    async fn test_timeout_yields_error_payload() {
        let (_tx, rx) = reply_channel(RequestId::from("req"));

        let payload = rx.await_reply(Duration::from_millis(20)).await;
        assert!(!payload.is_success());
        assert!(payload.message().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_dropped_sender_yields_internal_error() {
        let (tx, rx) = reply_channel(RequestId::from("req"));
        drop(tx);

        let payload = rx.await_reply(Duration::from_secs(1)).await;
        assert!(!payload.is_success());
        assert!(payload.message().unwrap().contains("internal error"));
    }

    #[tokio::test]
    async fn test_completion_after_caller_gave_up_returns_payload() {
        let (tx, rx) = reply_channel(RequestId::from("req"));
        drop(rx);

        let err = tx
            .complete(Payload::success(RequestId::from("req")))
            .unwrap_err();
        assert!(err.is_success());
    }
}
