//! Change descriptions.
//!
//! A change description tells subscribers what kind of change an input
//! caused so clients can refresh the right views. `Nothing` means the input
//! was accepted but produced no observable change.

use crate::id::RepresentationId;
use crate::input::RepresentationInput;
use serde::{Deserialize, Serialize};

/// Category of change produced by processing one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    /// Input accepted, no observable change.
    Nothing,
    /// The semantic model itself changed; every representation over the
    /// affected objects should refresh.
    SemanticChange,
    TableLayoutChange,
    TreeExpansionChange,
    FormChange,
    DiagramLayoutChange,
    SelectionChange,
    /// Reserved for disposal notifications.
    RepresentationDeleted,
}

/// Describes the change produced by processing one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeDescription {
    pub kind: ChangeKind,
    pub representation_id: RepresentationId,
    /// The input that caused this change, so subscribers can correlate
    /// notifications with their own pending requests.
    pub originating_input: RepresentationInput,
}

impl ChangeDescription {
    pub fn new(
        kind: ChangeKind,
        representation_id: RepresentationId,
        originating_input: RepresentationInput,
    ) -> Self {
        Self {
            kind,
            representation_id,
            originating_input,
        }
    }

    /// The no-observable-change description for an input.
    pub fn nothing(input: &RepresentationInput) -> Self {
        Self {
            kind: ChangeKind::Nothing,
            representation_id: input.representation_id().clone(),
            originating_input: input.clone(),
        }
    }

    pub fn is_nothing(&self) -> bool {
        self.kind == ChangeKind::Nothing
    }
}
