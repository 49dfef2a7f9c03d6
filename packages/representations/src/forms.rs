//! Form event handlers.
//!
//! Textfield edits write through to the semantic model object the widget is
//! bound to; button pushes only touch the form state.

use crate::invalid_input;
use atelier_collab::EventHandler;
use atelier_core::{
    ChangeDescription, ChangeKind, FormInput, Payload, RepresentationInput, RepresentationState,
    SemanticModel,
};

pub struct EditFormTextfieldHandler;

impl EventHandler for EditFormTextfieldHandler {
    fn name(&self) -> &'static str {
        "EditFormTextfieldHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(
            input,
            RepresentationInput::Form(FormInput::EditTextfield { .. })
        )
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Form(FormInput::EditTextfield {
            id,
            representation_id,
            widget_id,
            object_id,
            field,
            value,
        }) = input
        {
            if let RepresentationState::Form(form) = state {
                if !model.set_field(object_id, field, serde_json::Value::String(value.clone())) {
                    return (
                        Payload::error(id.clone(), format!("no such object: {object_id}")),
                        ChangeDescription::nothing(input),
                    );
                }
                form.values.insert(widget_id.clone(), value.clone());
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::SemanticChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}

pub struct PushFormButtonHandler;

impl EventHandler for PushFormButtonHandler {
    fn name(&self) -> &'static str {
        "PushFormButtonHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(input, RepresentationInput::Form(FormInput::PushButton { .. }))
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Form(FormInput::PushButton {
            id,
            representation_id,
            button_id,
        }) = input
        {
            if let RepresentationState::Form(form) = state {
                *form.button_clicks.entry(button_id.clone()).or_insert(0) += 1;
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::FormChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::{FormState, RepresentationId, RequestId};
    use serde_json::json;

    #[test]
    fn test_textfield_edit_updates_widget_and_model() {
        let mut state = RepresentationState::Form(FormState::default());
        let mut model = SemanticModel::new("m");
        model.insert_object("obj-1", json!({ "description": "" }));

        let input = RepresentationInput::Form(FormInput::EditTextfield {
            id: RequestId::from("req"),
            representation_id: RepresentationId::from("f1"),
            widget_id: "w1".to_string(),
            object_id: "obj-1".to_string(),
            field: "description".to_string(),
            value: "updated".to_string(),
        });
        let (payload, change) = EditFormTextfieldHandler.handle(&input, &mut state, &mut model);

        assert!(payload.is_success());
        assert_eq!(change.kind, ChangeKind::SemanticChange);
        assert_eq!(model.field("obj-1", "description"), Some(&json!("updated")));
        let RepresentationState::Form(form) = state else {
            unreachable!();
        };
        assert_eq!(form.values.get("w1"), Some(&"updated".to_string()));
    }

    #[test]
    fn test_button_pushes_accumulate() {
        let mut state = RepresentationState::Form(FormState::default());
        let mut model = SemanticModel::new("m");

        let input = RepresentationInput::Form(FormInput::PushButton {
            id: RequestId::from("req"),
            representation_id: RepresentationId::from("f1"),
            button_id: "b1".to_string(),
        });
        PushFormButtonHandler.handle(&input, &mut state, &mut model);
        let (payload, change) = PushFormButtonHandler.handle(&input, &mut state, &mut model);

        assert!(payload.is_success());
        assert_eq!(change.kind, ChangeKind::FormChange);
        let RepresentationState::Form(form) = state else {
            unreachable!();
        };
        assert_eq!(form.button_clicks.get("b1"), Some(&2));
    }
}
