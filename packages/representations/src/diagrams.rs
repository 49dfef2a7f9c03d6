//! Diagram event handlers.

use crate::invalid_input;
use atelier_collab::EventHandler;
use atelier_core::{
    ChangeDescription, ChangeKind, DiagramInput, DiagramLayoutEvent, Payload, Position,
    RepresentationInput, RepresentationState, SemanticModel,
};

pub struct MoveDiagramNodeHandler;

impl EventHandler for MoveDiagramNodeHandler {
    fn name(&self) -> &'static str {
        "MoveDiagramNodeHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(
            input,
            RepresentationInput::Diagram(DiagramInput::MoveNode { .. })
        )
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Diagram(DiagramInput::MoveNode {
            id,
            representation_id,
            node_id,
            x,
            y,
        }) = input
        {
            if let RepresentationState::Diagram(diagram) = state {
                let position = Position { x: *x, y: *y };
                diagram.positions.insert(node_id.clone(), position);
                diagram.record(DiagramLayoutEvent::NodeMoved {
                    node_id: node_id.clone(),
                    position,
                });
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::DiagramLayoutChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}

/// Discards manual positions and requests a full automatic layout.
pub struct LayoutDiagramHandler;

impl EventHandler for LayoutDiagramHandler {
    fn name(&self) -> &'static str {
        "LayoutDiagramHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(
            input,
            RepresentationInput::Diagram(DiagramInput::LayoutDiagram { .. })
        )
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Diagram(DiagramInput::LayoutDiagram {
            id,
            representation_id,
        }) = input
        {
            if let RepresentationState::Diagram(diagram) = state {
                diagram.positions.clear();
                diagram.record(DiagramLayoutEvent::FullLayoutRequested);
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::DiagramLayoutChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}
