//! Change notification fan-out.
//!
//! One broadcast ring per editing context, created lazily on first publish
//! or subscribe. Publication is fire-and-forget: the publishing session
//! never awaits a subscriber, and a slow subscriber only affects itself.
//!
//! Overflow policy: bounded ring buffer with drop-oldest. A subscriber that
//! falls more than `capacity` events behind loses the oldest buffered
//! events; the miss count is tracked on its subscription and logged, and the
//! subscriber stays connected. Events published before a subscription
//! started are never redelivered.

use atelier_core::{ChangeDescription, EditingContextId, RepresentationId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

/// Envelope delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub editing_context_id: EditingContextId,
    pub change: ChangeDescription,
    pub timestamp: DateTime<Utc>,
}

pub struct ChangeBus {
    capacity: usize,
    channels: Mutex<HashMap<EditingContextId, broadcast::Sender<ChangeEvent>>>,
}

impl ChangeBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            channels: Mutex::new(HashMap::new()),
        }
    }

    /// Publish a change for an editing context. Never blocks and never
    /// fails: with no live subscribers the event is dropped and the idle
    /// channel is pruned.
    pub fn publish(&self, editing_context_id: &EditingContextId, change: ChangeDescription) {
        let event = ChangeEvent {
            editing_context_id: editing_context_id.clone(),
            change,
            timestamp: Utc::now(),
        };

        let mut channels = self.channels.lock().unwrap();
        if let Some(sender) = channels.get(editing_context_id) {
            if sender.send(event).is_err() {
                // Last subscriber is gone; release the ring buffer.
                channels.remove(editing_context_id);
                tracing::debug!(
                    editing_context = %editing_context_id,
                    "pruned change channel without subscribers"
                );
            }
        }
    }

    /// Open a subscription for an editing context, optionally narrowed to a
    /// single representation. Dropping the subscription unsubscribes.
    pub fn subscribe(
        &self,
        editing_context_id: &EditingContextId,
        representation_id: Option<RepresentationId>,
    ) -> Subscription {
        let mut channels = self.channels.lock().unwrap();
        let sender = channels
            .entry(editing_context_id.clone())
            .or_insert_with(|| broadcast::channel(self.capacity).0);

        Subscription {
            editing_context_id: editing_context_id.clone(),
            representation_id,
            rx: sender.subscribe(),
            missed: 0,
        }
    }

    /// Live subscriber count for an editing context.
    pub fn subscriber_count(&self, editing_context_id: &EditingContextId) -> usize {
        self.channels
            .lock()
            .unwrap()
            .get(editing_context_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }
}

/// One subscriber's view of an editing context's change stream.
pub struct Subscription {
    editing_context_id: EditingContextId,
    representation_id: Option<RepresentationId>,
    rx: broadcast::Receiver<ChangeEvent>,
    missed: u64,
}

impl Subscription {
    /// Next matching change, or `None` once the channel is closed with no
    /// further events. Lag is absorbed here: missed events are counted and
    /// logged, then delivery resumes with the oldest event still buffered.
    pub async fn recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    self.missed += n;
                    tracing::warn!(
                        editing_context = %self.editing_context_id,
                        missed = n,
                        "subscriber lagged, oldest buffered changes dropped"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of `recv`.
    pub fn try_recv(&mut self) -> Option<ChangeEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if self.matches(&event) {
                        return Some(event);
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    self.missed += n;
                }
                Err(_) => return None,
            }
        }
    }

    fn matches(&self, event: &ChangeEvent) -> bool {
        match &self.representation_id {
            Some(filter) => &event.change.representation_id == filter,
            None => true,
        }
    }

    /// Events lost to the drop-oldest policy since this subscription opened.
    pub fn missed_count(&self) -> u64 {
        self.missed
    }

    /// Adapter for the transport layer: the remaining events as a stream,
    /// filtered like `recv`. Lagged gaps are skipped silently.
    pub fn into_stream(self) -> impl Stream<Item = ChangeEvent> {
        let filter = self.representation_id;
        BroadcastStream::new(self.rx).filter_map(move |item| match item {
            Ok(event) => match &filter {
                Some(wanted) if &event.change.representation_id != wanted => None,
                _ => Some(event),
            },
            Err(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{
        ChangeKind, RepresentationInput, RequestId, SelectionInput, TableInput,
    };

    fn table_change(representation: &str, request: &str) -> ChangeDescription {
        let input = RepresentationInput::Table(TableInput::ResetRowsHeight {
            id: RequestId::from(request),
            representation_id: RepresentationId::from(representation),
        });
        ChangeDescription::new(
            ChangeKind::TableLayoutChange,
            RepresentationId::from(representation),
            input,
        )
    }

    fn selection_change(representation: &str, request: &str) -> ChangeDescription {
        let input = RepresentationInput::Selection(SelectionInput::UpdateSelection {
            id: RequestId::from(request),
            representation_id: RepresentationId::from(representation),
            object_ids: vec![],
        });
        ChangeDescription::new(
            ChangeKind::SelectionChange,
            RepresentationId::from(representation),
            input,
        )
    }

    #[tokio::test]
    async fn test_fan_out_to_all_subscribers() {
        let bus = ChangeBus::new(16);
        let ctx = EditingContextId::from("ctx");

        let mut first = bus.subscribe(&ctx, None);
        let mut second = bus.subscribe(&ctx, None);
        assert_eq!(bus.subscriber_count(&ctx), 2);

        bus.publish(&ctx, table_change("t1", "req-1"));

        let a = first.recv().await.unwrap();
        let b = second.recv().await.unwrap();
        assert_eq!(a.change.kind, ChangeKind::TableLayoutChange);
        assert_eq!(a.change, b.change);
    }

    #[tokio::test]
    async fn test_representation_filter() {
        let bus = ChangeBus::new(16);
        let ctx = EditingContextId::from("ctx");

        let mut filtered = bus.subscribe(&ctx, Some(RepresentationId::from("t1")));

        bus.publish(&ctx, selection_change("sel-1", "req-1"));
        bus.publish(&ctx, table_change("t1", "req-2"));

        let event = filtered.recv().await.unwrap();
        assert_eq!(event.change.representation_id, RepresentationId::from("t1"));
        assert!(filtered.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_no_cross_context_delivery() {
        let bus = ChangeBus::new(16);
        let ctx_a = EditingContextId::from("a");
        let ctx_b = EditingContextId::from("b");

        let mut sub_b = bus.subscribe(&ctx_b, None);
        bus.publish(&ctx_a, table_change("t1", "req-1"));

        assert!(sub_b.try_recv().is_none());
    }

    #[tokio::test]
    async fn test_overflow_drops_oldest_and_counts_misses() {
        let bus = ChangeBus::new(4);
        let ctx = EditingContextId::from("ctx");
        let mut slow = bus.subscribe(&ctx, None);

        for i in 0..10 {
            bus.publish(&ctx, table_change("t1", &format!("req-{i}")));
        }

        // The newest events survive; everything older was dropped.
        let mut received = Vec::new();
        while let Some(event) = slow.try_recv() {
            received.push(event.change.originating_input.request_id().clone());
        }
        assert!(!received.is_empty());
        assert!(received.len() <= 4);
        assert_eq!(received.last().unwrap(), &RequestId::from("req-9"));
        assert!(slow.missed_count() >= 6);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let bus = ChangeBus::new(4);
        let ctx = EditingContextId::from("ctx");

        bus.publish(&ctx, table_change("t1", "req-1"));
        assert_eq!(bus.subscriber_count(&ctx), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_releases_channel() {
        let bus = ChangeBus::new(4);
        let ctx = EditingContextId::from("ctx");

        for _ in 0..100 {
            let sub = bus.subscribe(&ctx, None);
            drop(sub);
        }
        assert_eq!(bus.subscriber_count(&ctx), 0);

        // Next publish notices the receivers are gone and prunes the entry.
        bus.publish(&ctx, table_change("t1", "req-1"));
        assert!(bus.channels.lock().unwrap().get(&ctx).is_none());
    }

    #[tokio::test]
    async fn test_stream_adapter_applies_the_filter() {
        let bus = ChangeBus::new(16);
        let ctx = EditingContextId::from("ctx");

        let sub = bus.subscribe(&ctx, Some(RepresentationId::from("t1")));
        bus.publish(&ctx, selection_change("sel-1", "req-1"));
        bus.publish(&ctx, table_change("t1", "req-2"));

        let mut stream = sub.into_stream();
        let event = stream.next().await.unwrap();
        assert_eq!(event.change.representation_id, RepresentationId::from("t1"));
    }

    #[tokio::test]
    async fn test_no_replay_before_subscription() {
        let bus = ChangeBus::new(16);
        let ctx = EditingContextId::from("ctx");

        // Publish while a subscriber exists so the channel stays alive.
        let _keeper = bus.subscribe(&ctx, None);
        bus.publish(&ctx, table_change("t1", "req-early"));

        let mut late = bus.subscribe(&ctx, None);
        assert!(late.try_recv().is_none());

        bus.publish(&ctx, table_change("t1", "req-late"));
        let event = late.recv().await.unwrap();
        assert_eq!(
            event.change.originating_input.request_id(),
            &RequestId::from("req-late")
        );
    }
}
