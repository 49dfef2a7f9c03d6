//! # Atelier Core
//!
//! Shared data model for the collaborative modeling platform.
//!
//! Everything here is a plain value: identities, typed inputs submitted by
//! clients, the single reply payload each input produces, and the change
//! descriptions broadcast to subscribers. The processing machinery lives in
//! `atelier-collab`; concrete per-representation handlers live in
//! `atelier-representations`.

pub mod change;
pub mod id;
pub mod input;
pub mod model;
pub mod payload;
pub mod representation;

pub use change::{ChangeDescription, ChangeKind};
pub use id::{EditingContextId, RepresentationId, RequestId};
pub use input::{
    DiagramInput, FormInput, RepresentationInput, SelectionInput, TableInput, TreeInput,
};
pub use model::SemanticModel;
pub use payload::Payload;
pub use representation::{
    DiagramLayoutEvent, DiagramState, FormState, Position, RepresentationDescription,
    RepresentationKind, RepresentationState, SelectionState, TableLayoutEvent, TableState,
    TreeState,
};
