//! Error types for the collaboration machinery.
//!
//! Anything that goes wrong while processing a single input is converted to
//! an error `Payload` and never surfaces here. These errors cover the
//! submission path only: inputs that could not be queued at all.

use atelier_core::EditingContextId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollabError {
    #[error("no editing context found for '{0}'")]
    SessionUnavailable(EditingContextId),

    #[error("editing context session is disposed")]
    SessionDisposed,

    #[error("editing context session queue is full")]
    QueueFull,
}
