//! # Atelier Collab
//!
//! Event-processing core for collaborative editing contexts.
//!
//! ## Architecture
//!
//! ```text
//! client ── submit(input) ──▶ EditingContextService
//!                                   │ one session per editing context
//!                                   ▼
//!                        EditingContextSession (serial loop)
//!                                   │ one turn per input
//!                                   ▼
//!                        EventHandlerRegistry ── first capable handler
//!                                   │
//!                    ┌──────────────┴──────────────┐
//!                    ▼                             ▼
//!               ReplySlot                     ChangeBus
//!          (one payload per input)    (fan-out to subscribers)
//! ```
//!
//! ## Guarantees
//!
//! 1. **FIFO per editing context**: inputs are processed one turn at a
//!    time, in submission order; different editing contexts run in parallel
//! 2. **Exactly one reply per input**: success, domain error, timeout, or
//!    shutdown — never silence, never two replies
//! 3. **Fire-and-forget notification**: publishing never awaits a
//!    subscriber; slow subscribers lose oldest events (drop-oldest ring)
//! 4. **Failure containment**: a panicking handler costs one turn, never
//!    the session

pub mod change_bus;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod handler;
pub mod reply;
pub mod service;
pub mod session;

pub use change_bus::{ChangeBus, ChangeEvent, Subscription};
pub use config::CollabConfig;
pub use dispatcher::EventHandlerRegistry;
pub use errors::CollabError;
pub use handler::EventHandler;
pub use reply::{reply_channel, ReplySender, ReplySlot};
pub use service::{EditingContextService, EditingContextSnapshot, SemanticModelProvider};
pub use session::EditingContextSession;
