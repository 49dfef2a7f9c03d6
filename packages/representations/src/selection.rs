//! Selection event handler.

use crate::invalid_input;
use atelier_collab::EventHandler;
use atelier_core::{
    ChangeDescription, ChangeKind, Payload, RepresentationInput, RepresentationState,
    SelectionInput, SemanticModel,
};

/// Replaces the current selection. Re-selecting the same objects is
/// accepted but reports no observable change.
pub struct UpdateSelectionHandler;

impl EventHandler for UpdateSelectionHandler {
    fn name(&self) -> &'static str {
        "UpdateSelectionHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(
            input,
            RepresentationInput::Selection(SelectionInput::UpdateSelection { .. })
        )
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Selection(SelectionInput::UpdateSelection {
            id,
            representation_id,
            object_ids,
        }) = input
        {
            if let RepresentationState::Selection(selection) = state {
                if &selection.selected == object_ids {
                    return (Payload::success(id.clone()), ChangeDescription::nothing(input));
                }
                selection.selected = object_ids.clone();
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::SelectionChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}
