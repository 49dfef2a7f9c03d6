//! # Atelier Representations
//!
//! Concrete event handlers for every representation family: tables, trees,
//! forms, diagrams and selection. Each handler recognizes a subset of input
//! variants and executes them against the family's state; the sets are
//! mutually exclusive, so registration order never matters in practice.

pub mod diagrams;
pub mod forms;
pub mod selection;
pub mod tables;
pub mod trees;

use atelier_collab::{EventHandler, EventHandlerRegistry};
use std::sync::Arc;

pub use diagrams::{LayoutDiagramHandler, MoveDiagramNodeHandler};
pub use forms::{EditFormTextfieldHandler, PushFormButtonHandler};
pub use selection::UpdateSelectionHandler;
pub use tables::{
    EditTableCellHandler, ResetTableRowsHeightHandler, ResizeTableColumnHandler,
    ResizeTableRowHandler,
};
pub use trees::{CollapseTreeItemHandler, ExpandTreeItemHandler};

/// The full handler set, one handler per input variant, assembled once at
/// startup and shared by every session.
pub fn standard_registry() -> EventHandlerRegistry {
    let handlers: Vec<Arc<dyn EventHandler>> = vec![
        Arc::new(ResetTableRowsHeightHandler),
        Arc::new(EditTableCellHandler),
        Arc::new(ResizeTableColumnHandler),
        Arc::new(ResizeTableRowHandler),
        Arc::new(ExpandTreeItemHandler),
        Arc::new(CollapseTreeItemHandler),
        Arc::new(EditFormTextfieldHandler),
        Arc::new(PushFormButtonHandler),
        Arc::new(MoveDiagramNodeHandler),
        Arc::new(LayoutDiagramHandler),
        Arc::new(UpdateSelectionHandler),
    ];
    EventHandlerRegistry::new(handlers)
}

/// Shared fallback for a handler invoked with an input it does not
/// recognize. Dispatch prevents this; the reply still degrades gracefully.
pub(crate) fn invalid_input(
    handler: &dyn EventHandler,
    input: &atelier_core::RepresentationInput,
) -> (atelier_core::Payload, atelier_core::ChangeDescription) {
    (
        atelier_core::Payload::error(
            input.request_id().clone(),
            format!(
                "invalid input {} for handler {}",
                input.variant_name(),
                handler.name()
            ),
        ),
        atelier_core::ChangeDescription::nothing(input),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_covers_every_family() {
        let registry = standard_registry();
        assert_eq!(registry.len(), 11);

        let names = registry.handler_names();
        assert!(names.contains(&"ResetTableRowsHeightHandler"));
        assert!(names.contains(&"UpdateSelectionHandler"));
    }
}
