//! Tree event handlers.
//!
//! Expanding an already-expanded item (or collapsing an already-collapsed
//! one) is accepted but reports no observable change.

use crate::invalid_input;
use atelier_collab::EventHandler;
use atelier_core::{
    ChangeDescription, ChangeKind, Payload, RepresentationInput, RepresentationState,
    SemanticModel, TreeInput,
};

pub struct ExpandTreeItemHandler;

impl EventHandler for ExpandTreeItemHandler {
    fn name(&self) -> &'static str {
        "ExpandTreeItemHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(input, RepresentationInput::Tree(TreeInput::ExpandItem { .. }))
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Tree(TreeInput::ExpandItem {
            id,
            representation_id,
            item_id,
        }) = input
        {
            if let RepresentationState::Tree(tree) = state {
                let changed = tree.expanded.insert(item_id.clone());
                let change = if changed {
                    ChangeDescription::new(
                        ChangeKind::TreeExpansionChange,
                        representation_id.clone(),
                        input.clone(),
                    )
                } else {
                    ChangeDescription::nothing(input)
                };
                return (Payload::success(id.clone()), change);
            }
        }
        invalid_input(self, input)
    }
}

pub struct CollapseTreeItemHandler;

impl EventHandler for CollapseTreeItemHandler {
    fn name(&self) -> &'static str {
        "CollapseTreeItemHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(
            input,
            RepresentationInput::Tree(TreeInput::CollapseItem { .. })
        )
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Tree(TreeInput::CollapseItem {
            id,
            representation_id,
            item_id,
        }) = input
        {
            if let RepresentationState::Tree(tree) = state {
                let changed = tree.expanded.remove(item_id);
                let change = if changed {
                    ChangeDescription::new(
                        ChangeKind::TreeExpansionChange,
                        representation_id.clone(),
                        input.clone(),
                    )
                } else {
                    ChangeDescription::nothing(input)
                };
                return (Payload::success(id.clone()), change);
            }
        }
        invalid_input(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{RepresentationId, RequestId, TreeState};

    fn expand(item: &str) -> RepresentationInput {
        RepresentationInput::Tree(TreeInput::ExpandItem {
            id: RequestId::from("req"),
            representation_id: RepresentationId::from("tr1"),
            item_id: item.to_string(),
        })
    }

    fn collapse(item: &str) -> RepresentationInput {
        RepresentationInput::Tree(TreeInput::CollapseItem {
            id: RequestId::from("req"),
            representation_id: RepresentationId::from("tr1"),
            item_id: item.to_string(),
        })
    }

    #[test]
    fn test_expand_then_collapse_round_trip() {
        let mut state = RepresentationState::Tree(TreeState::default());
        let mut model = SemanticModel::new("m");

        let (payload, change) = ExpandTreeItemHandler.handle(&expand("n1"), &mut state, &mut model);
        assert!(payload.is_success());
        assert_eq!(change.kind, ChangeKind::TreeExpansionChange);

        let (payload, change) =
            CollapseTreeItemHandler.handle(&collapse("n1"), &mut state, &mut model);
        assert!(payload.is_success());
        assert_eq!(change.kind, ChangeKind::TreeExpansionChange);

        let RepresentationState::Tree(tree) = state else {
            unreachable!();
        };
        assert!(tree.expanded.is_empty());
    }

    #[test]
    fn test_redundant_operations_report_nothing() {
        let mut state = RepresentationState::Tree(TreeState::default());
        let mut model = SemanticModel::new("m");

        // Collapsing an item that was never expanded: accepted, no change.
        let (payload, change) =
            CollapseTreeItemHandler.handle(&collapse("n1"), &mut state, &mut model);
        assert!(payload.is_success());
        assert!(change.is_nothing());

        ExpandTreeItemHandler.handle(&expand("n1"), &mut state, &mut model);
        let (payload, change) = ExpandTreeItemHandler.handle(&expand("n1"), &mut state, &mut model);
        assert!(payload.is_success());
        assert!(change.is_nothing());
    }
}
