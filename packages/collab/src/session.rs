//! Per-editing-context serial processing.
//!
//! Each editing context is owned by exactly one session: a spawned task
//! draining a FIFO queue one turn at a time. The task exclusively owns the
//! semantic model and every representation state, so handlers never race —
//! no two inputs for the same editing context are processed concurrently or
//! out of submission order. Sessions for different editing contexts run
//! fully in parallel and share nothing but the change bus.

use crate::change_bus::ChangeBus;
use crate::config::CollabConfig;
use crate::dispatcher::EventHandlerRegistry;
use crate::errors::CollabError;
use crate::reply::{reply_channel, ReplySender, ReplySlot};
use atelier_core::{
    ChangeDescription, EditingContextId, Payload, RepresentationDescription, RepresentationId,
    RepresentationInput, RepresentationState, SemanticModel,
};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};

struct Turn {
    input: RepresentationInput,
    reply: ReplySender,
}

/// Handle to one editing context's session. Cheap to clone; the processing
/// task keeps running as long as the session is not disposed.
#[derive(Clone)]
pub struct EditingContextSession {
    shared: Arc<SessionShared>,
}

struct SessionShared {
    id: EditingContextId,
    tx: mpsc::Sender<Turn>,
    dispose_tx: Mutex<Option<oneshot::Sender<()>>>,
    disposed: AtomicBool,
    last_activity: Mutex<Instant>,
}

impl EditingContextSession {
    /// Spawn the session task. Must be called inside a tokio runtime.
    pub fn spawn(
        id: EditingContextId,
        model: SemanticModel,
        descriptions: Vec<RepresentationDescription>,
        registry: Arc<EventHandlerRegistry>,
        bus: Arc<ChangeBus>,
        config: &CollabConfig,
    ) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let (dispose_tx, dispose_rx) = oneshot::channel();

        let worker = SessionWorker {
            id: id.clone(),
            model,
            descriptions: descriptions
                .into_iter()
                .map(|description| (description.id.clone(), description))
                .collect(),
            states: HashMap::new(),
            registry,
            bus,
            turns: 0,
        };
        tokio::spawn(worker.run(rx, dispose_rx));

        tracing::info!(editing_context = %id, "session started");
        Self {
            shared: Arc::new(SessionShared {
                id,
                tx,
                dispose_tx: Mutex::new(Some(dispose_tx)),
                disposed: AtomicBool::new(false),
                last_activity: Mutex::new(Instant::now()),
            }),
        }
    }

    pub fn id(&self) -> &EditingContextId {
        &self.shared.id
    }

    /// Enqueue one input. The returned slot resolves to the single reply;
    /// awaiting it never blocks the session loop.
    pub fn submit(&self, input: RepresentationInput) -> Result<ReplySlot, CollabError> {
        if self.is_disposed() {
            return Err(CollabError::SessionDisposed);
        }

        let (reply, slot) = reply_channel(input.request_id().clone());
        match self.shared.tx.try_send(Turn { input, reply }) {
            Ok(()) => {
                *self.shared.last_activity.lock().unwrap() = Instant::now();
                Ok(slot)
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(CollabError::QueueFull),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(CollabError::SessionDisposed),
        }
    }

    /// Stop the session. Queued-but-not-started inputs are cancelled with a
    /// shutdown error payload; an in-flight turn finishes first. Idempotent.
    pub fn dispose(&self) {
        self.shared.disposed.store(true, Ordering::SeqCst);
        if let Some(tx) = self.shared.dispose_tx.lock().unwrap().take() {
            let _ = tx.send(());
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::SeqCst)
    }

    /// Time since the last accepted submission.
    pub fn idle_for(&self) -> Duration {
        self.shared.last_activity.lock().unwrap().elapsed()
    }
}

struct SessionWorker {
    id: EditingContextId,
    model: SemanticModel,
    descriptions: HashMap<RepresentationId, RepresentationDescription>,
    states: HashMap<RepresentationId, RepresentationState>,
    registry: Arc<EventHandlerRegistry>,
    bus: Arc<ChangeBus>,
    turns: u64,
}

impl SessionWorker {
    async fn run(mut self, mut rx: mpsc::Receiver<Turn>, mut dispose_rx: oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                // Dispose wins over queued turns: those are cancelled, only
                // an already-started turn runs to completion.
                biased;
                _ = &mut dispose_rx => {
                    self.drain(&mut rx);
                    break;
                }
                turn = rx.recv() => match turn {
                    Some(turn) => self.process_turn(turn),
                    None => break,
                }
            }
        }
        tracing::info!(editing_context = %self.id, turns = self.turns, "session stopped");
    }

    fn process_turn(&mut self, turn: Turn) {
        self.turns += 1;
        let request_id = turn.input.request_id().clone();
        let representation_id = turn.input.representation_id().clone();
        tracing::debug!(
            editing_context = %self.id,
            turn = self.turns,
            request = %request_id,
            representation = %representation_id,
            input = turn.input.variant_name(),
            "processing turn"
        );

        // Resolve the target state, constructing it lazily on first access
        // when a matching description exists.
        let state = match self.states.entry(representation_id.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => match self.descriptions.get(&representation_id) {
                Some(description) => entry.insert(RepresentationState::new_for(description)),
                None => {
                    let payload = Payload::error(
                        request_id,
                        format!("unknown representation: {representation_id}"),
                    );
                    self.deliver(turn.reply, payload, None);
                    return;
                }
            },
        };

        let registry = &self.registry;
        let model = &mut self.model;
        let input = &turn.input;
        let outcome = catch_unwind(AssertUnwindSafe(|| registry.dispatch(input, state, model)));

        let (payload, change) = match outcome {
            Ok((payload, change)) => (payload, Some(change)),
            Err(_) => {
                tracing::error!(
                    editing_context = %self.id,
                    input = turn.input.variant_name(),
                    "handler panicked, turn recovered"
                );
                (
                    Payload::error(turn.input.request_id().clone(), "internal error"),
                    Some(ChangeDescription::nothing(&turn.input)),
                )
            }
        };

        self.deliver(turn.reply, payload, change);
    }

    /// Commit the reply, then publish the change. A caller that already
    /// gave up is not an error: the turn's result is simply discarded.
    fn deliver(&self, reply: ReplySender, payload: Payload, change: Option<ChangeDescription>) {
        if let Err(discarded) = reply.complete(payload) {
            tracing::debug!(
                editing_context = %self.id,
                request = %discarded.request_id(),
                "caller gone, reply discarded"
            );
        }
        if let Some(change) = change {
            self.bus.publish(&self.id, change);
        }
    }

    /// Cancel everything still queued with a shutdown error payload. No
    /// change descriptions are published for cancelled inputs.
    fn drain(&mut self, rx: &mut mpsc::Receiver<Turn>) {
        rx.close();
        let mut cancelled = 0usize;
        while let Ok(turn) = rx.try_recv() {
            let request_id = turn.input.request_id().clone();
            let _ = turn
                .reply
                .complete(Payload::error(request_id, "editing context session disposed"));
            cancelled += 1;
        }
        if cancelled > 0 {
            tracing::info!(
                editing_context = %self.id,
                cancelled,
                "cancelled queued inputs on dispose"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::EventHandler;
    use atelier_core::{ChangeKind, RepresentationKind, RequestId, SelectionInput};

    struct SelectionHandler;

    impl EventHandler for SelectionHandler {
        fn name(&self) -> &'static str {
            "SelectionHandler"
        }

        fn can_handle(&self, input: &RepresentationInput) -> bool {
            matches!(input, RepresentationInput::Selection(_))
        }

        fn handle(
            &self,
            input: &RepresentationInput,
            state: &mut RepresentationState,
            _model: &mut SemanticModel,
        ) -> (Payload, ChangeDescription) {
            let RepresentationInput::Selection(SelectionInput::UpdateSelection {
                id,
                representation_id,
                object_ids,
            }) = input
            else {
                unreachable!("can_handle filtered the variant");
            };
            let RepresentationState::Selection(selection) = state else {
                unreachable!("session resolves state by description kind");
            };
            selection.selected = object_ids.clone();
            (
                Payload::success(id.clone()),
                ChangeDescription::new(
                    ChangeKind::SelectionChange,
                    representation_id.clone(),
                    input.clone(),
                ),
            )
        }
    }

    struct PanickingHandler;

    impl EventHandler for PanickingHandler {
        fn name(&self) -> &'static str {
            "PanickingHandler"
        }

        fn can_handle(&self, input: &RepresentationInput) -> bool {
            matches!(input, RepresentationInput::Table(_))
        }

        fn handle(
            &self,
            _input: &RepresentationInput,
            _state: &mut RepresentationState,
            _model: &mut SemanticModel,
        ) -> (Payload, ChangeDescription) {
            panic!("boom");
        }
    }

    fn test_session(bus: Arc<ChangeBus>) -> EditingContextSession {
        let registry = Arc::new(EventHandlerRegistry::new(vec![
            Arc::new(SelectionHandler),
            Arc::new(PanickingHandler),
        ]));
        let descriptions = vec![
            RepresentationDescription::new("sel-1", RepresentationKind::Selection, "Selection"),
            RepresentationDescription::new("table-1", RepresentationKind::Table, "Parts"),
        ];
        EditingContextSession::spawn(
            EditingContextId::from("ctx"),
            SemanticModel::new("model"),
            descriptions,
            registry,
            bus,
            &CollabConfig::default(),
        )
    }

    fn select(request: &str, objects: &[&str]) -> RepresentationInput {
        RepresentationInput::Selection(SelectionInput::UpdateSelection {
            id: RequestId::from(request),
            representation_id: RepresentationId::from("sel-1"),
            object_ids: objects.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[tokio::test]
    async fn test_turn_produces_reply_and_change() {
        let bus = Arc::new(ChangeBus::new(16));
        let session = test_session(bus.clone());
        let mut sub = bus.subscribe(&EditingContextId::from("ctx"), None);

        let slot = session.submit(select("req-1", &["obj-1"])).unwrap();
        let payload = slot.await_reply(Duration::from_secs(1)).await;
        assert!(payload.is_success());

        let event = sub.recv().await.unwrap();
        assert_eq!(event.change.kind, ChangeKind::SelectionChange);
        assert_eq!(event.editing_context_id, EditingContextId::from("ctx"));
    }

    #[tokio::test]
    async fn test_unknown_representation_is_rejected_without_state() {
        let bus = Arc::new(ChangeBus::new(16));
        let session = test_session(bus.clone());
        let mut sub = bus.subscribe(&EditingContextId::from("ctx"), None);

        let input = RepresentationInput::Selection(SelectionInput::UpdateSelection {
            id: RequestId::from("req-1"),
            representation_id: RepresentationId::from("ghost"),
            object_ids: vec![],
        });
        let payload = session
            .submit(input)
            .unwrap()
            .await_reply(Duration::from_secs(1))
            .await;

        assert!(!payload.is_success());
        assert!(payload.message().unwrap().contains("unknown representation"));
        // No change is published for a rejected representation id.
        let ok = session
            .submit(select("req-2", &["a"]))
            .unwrap()
            .await_reply(Duration::from_secs(1))
            .await;
        assert!(ok.is_success());
        let event = sub.recv().await.unwrap();
        assert_eq!(
            event.change.originating_input.request_id(),
            &RequestId::from("req-2")
        );
    }

    #[tokio::test]
    async fn test_handler_panic_does_not_kill_the_session() {
        let bus = Arc::new(ChangeBus::new(16));
        let session = test_session(bus);

        let bad = RepresentationInput::Table(atelier_core::TableInput::ResetRowsHeight {
            id: RequestId::from("req-bad"),
            representation_id: RepresentationId::from("table-1"),
        });
        let payload = session
            .submit(bad)
            .unwrap()
            .await_reply(Duration::from_secs(1))
            .await;
        assert_eq!(payload.message(), Some("internal error"));

        // The session keeps processing subsequent inputs.
        let payload = session
            .submit(select("req-after", &["x"]))
            .unwrap()
            .await_reply(Duration::from_secs(1))
            .await;
        assert!(payload.is_success());
    }

    #[tokio::test]
    async fn test_dispose_rejects_new_submissions() {
        let bus = Arc::new(ChangeBus::new(16));
        let session = test_session(bus);

        session.dispose();
        session.dispose(); // idempotent

        assert!(matches!(
            session.submit(select("req", &[])),
            Err(CollabError::SessionDisposed)
        ));
    }
}
