//! Capability handler contract.

use atelier_core::{ChangeDescription, Payload, RepresentationInput, RepresentationState, SemanticModel};

/// A unit capable of recognizing and executing a subset of input variants.
///
/// Handlers are registered in an explicit ordered list at startup; the
/// dispatcher invokes the first handler whose `can_handle` returns true.
/// A handler must not touch anything when `can_handle` is false, and must
/// mutate only the state and model passed into `handle` — both are owned by
/// the calling session and only reachable inside its serial turn.
pub trait EventHandler: Send + Sync {
    /// Stable name used in logs, counters and the unsupported-input message.
    fn name(&self) -> &'static str;

    fn can_handle(&self, input: &RepresentationInput) -> bool;

    /// Execute the input. Must return exactly one payload and one change
    /// description; a rejected input is an error payload plus `Nothing`.
    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription);
}
