//! Handler registry and first-match dispatch.

use crate::handler::EventHandler;
use atelier_core::{ChangeDescription, Payload, RepresentationInput, RepresentationState, SemanticModel};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct HandlerEntry {
    handler: Arc<dyn EventHandler>,
    invocations: AtomicU64,
}

/// Immutable, ordered set of handlers constructed at startup.
///
/// Registration order is only a tie-break: registries must be assembled so
/// that `can_handle` sets do not overlap. The scan stops at the first match,
/// so no input is ever partially applied by two handlers. When nothing
/// matches, a synthesized error payload plus a `Nothing` change is returned;
/// that fallback never fails.
pub struct EventHandlerRegistry {
    entries: Vec<HandlerEntry>,
}

impl EventHandlerRegistry {
    pub fn new(handlers: Vec<Arc<dyn EventHandler>>) -> Self {
        Self {
            entries: handlers
                .into_iter()
                .map(|handler| HandlerEntry {
                    handler,
                    invocations: AtomicU64::new(0),
                })
                .collect(),
        }
    }

    /// Route one input to the first capable handler.
    pub fn dispatch(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        for entry in &self.entries {
            if entry.handler.can_handle(input) {
                entry.invocations.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    handler = entry.handler.name(),
                    input = input.variant_name(),
                    "dispatching input"
                );
                return entry.handler.handle(input, state, model);
            }
        }

        let message = format!(
            "unsupported input: {}, expected one of [{}]",
            input.variant_name(),
            self.handler_names().join(", ")
        );
        tracing::warn!(input = input.variant_name(), "no capable handler");
        (
            Payload::error(input.request_id().clone(), message),
            ChangeDescription::nothing(input),
        )
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .map(|entry| entry.handler.name())
            .collect()
    }

    /// How many inputs a handler has executed, by handler name.
    pub fn invocation_count(&self, name: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|entry| entry.handler.name() == name)
            .map(|entry| entry.invocations.load(Ordering::Relaxed))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
