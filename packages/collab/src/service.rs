//! Editing-context lifecycle and submission front door.
//!
//! The service owns the map of live sessions, creating them lazily from the
//! semantic model provider on first access and disposing them explicitly or
//! after inactivity. All transport-facing entry points go through here.

use crate::change_bus::{ChangeBus, Subscription};
use crate::config::CollabConfig;
use crate::dispatcher::EventHandlerRegistry;
use crate::errors::CollabError;
use crate::reply::ReplySlot;
use crate::session::EditingContextSession;
use atelier_core::{
    EditingContextId, Payload, RepresentationDescription, RepresentationId, RepresentationInput,
    SemanticModel,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Everything a session needs at creation time, loaded once.
pub struct EditingContextSnapshot {
    pub model: SemanticModel,
    pub descriptions: Vec<RepresentationDescription>,
}

/// External collaborator supplying loaded semantic models.
///
/// `None` means the editing context id is unknown; the submission is
/// rejected without creating a session.
pub trait SemanticModelProvider: Send + Sync {
    fn load(&self, editing_context_id: &EditingContextId) -> Option<EditingContextSnapshot>;
}

pub struct EditingContextService {
    provider: Arc<dyn SemanticModelProvider>,
    registry: Arc<EventHandlerRegistry>,
    bus: Arc<ChangeBus>,
    config: CollabConfig,
    sessions: Mutex<HashMap<EditingContextId, EditingContextSession>>,
}

impl EditingContextService {
    pub fn new(
        provider: Arc<dyn SemanticModelProvider>,
        registry: Arc<EventHandlerRegistry>,
        config: CollabConfig,
    ) -> Self {
        let bus = Arc::new(ChangeBus::new(config.change_buffer_capacity));
        Self {
            provider,
            registry,
            bus,
            config,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The session for an editing context, creating it on first access.
    /// Must be called inside a tokio runtime; sessions are spawned tasks.
    pub fn session(
        &self,
        editing_context_id: &EditingContextId,
    ) -> Result<EditingContextSession, CollabError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(session) = sessions.get(editing_context_id) {
            if !session.is_disposed() {
                return Ok(session.clone());
            }
            sessions.remove(editing_context_id);
        }

        let snapshot = self
            .provider
            .load(editing_context_id)
            .ok_or_else(|| CollabError::SessionUnavailable(editing_context_id.clone()))?;
        let session = EditingContextSession::spawn(
            editing_context_id.clone(),
            snapshot.model,
            snapshot.descriptions,
            self.registry.clone(),
            self.bus.clone(),
            &self.config,
        );
        sessions.insert(editing_context_id.clone(), session.clone());
        Ok(session)
    }

    /// Warm up a session without submitting anything.
    pub fn warm_up(&self, editing_context_id: &EditingContextId) -> Result<(), CollabError> {
        self.session(editing_context_id).map(|_| ())
    }

    /// Enqueue one input on its editing context's session.
    pub fn submit(
        &self,
        editing_context_id: &EditingContextId,
        input: RepresentationInput,
    ) -> Result<ReplySlot, CollabError> {
        self.session(editing_context_id)?.submit(input)
    }

    /// Submit and await the single terminal payload. Submission failures
    /// come back as error payloads so every caller always receives exactly
    /// one reply — success, domain error, timeout, or shutdown.
    pub async fn execute(
        &self,
        editing_context_id: &EditingContextId,
        input: RepresentationInput,
    ) -> Payload {
        let request_id = input.request_id().clone();
        match self.submit(editing_context_id, input) {
            Ok(slot) => slot.await_reply(self.config.reply_timeout).await,
            Err(err) => Payload::error(request_id, err.to_string()),
        }
    }

    /// Subscribe to change notifications, optionally narrowed to one
    /// representation. Dropping the subscription unsubscribes.
    pub fn subscribe(
        &self,
        editing_context_id: &EditingContextId,
        representation_id: Option<RepresentationId>,
    ) -> Subscription {
        self.bus.subscribe(editing_context_id, representation_id)
    }

    pub fn change_bus(&self) -> &Arc<ChangeBus> {
        &self.bus
    }

    /// Dispose one editing context. Idempotent; unknown ids are a no-op.
    pub fn dispose(&self, editing_context_id: &EditingContextId) {
        if let Some(session) = self.sessions.lock().unwrap().remove(editing_context_id) {
            session.dispose();
        }
    }

    pub fn dispose_all(&self) {
        let sessions = std::mem::take(&mut *self.sessions.lock().unwrap());
        for session in sessions.into_values() {
            session.dispose();
        }
    }

    /// Dispose sessions idle longer than the configured idle timeout.
    /// Returns how many were reaped.
    pub fn reap_idle(&self) -> usize {
        let mut sessions = self.sessions.lock().unwrap();
        let idle: Vec<EditingContextId> = sessions
            .iter()
            .filter(|(_, session)| session.idle_for() >= self.config.idle_timeout)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &idle {
            if let Some(session) = sessions.remove(id) {
                tracing::info!(editing_context = %id, "reaping idle session");
                session.dispose();
            }
        }
        idle.len()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}
