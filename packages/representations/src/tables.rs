//! Table event handlers.
//!
//! Layout inputs (row heights, column widths) touch only the table state;
//! cell edits write through to the semantic model and therefore report a
//! semantic change rather than a layout change.

use crate::invalid_input;
use atelier_collab::EventHandler;
use atelier_core::{
    ChangeDescription, ChangeKind, Payload, RepresentationInput, RepresentationState,
    SemanticModel, TableInput, TableLayoutEvent,
};

/// Handle rows height reset.
pub struct ResetTableRowsHeightHandler;

impl EventHandler for ResetTableRowsHeightHandler {
    fn name(&self) -> &'static str {
        "ResetTableRowsHeightHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(
            input,
            RepresentationInput::Table(TableInput::ResetRowsHeight { .. })
        )
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Table(TableInput::ResetRowsHeight {
            id,
            representation_id,
        }) = input
        {
            if let RepresentationState::Table(table) = state {
                table.row_heights.clear();
                table.record(TableLayoutEvent::RowsHeightReset);
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::TableLayoutChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}

/// Handle cell edits, backed by the semantic model.
pub struct EditTableCellHandler;

impl EventHandler for EditTableCellHandler {
    fn name(&self) -> &'static str {
        "EditTableCellHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(input, RepresentationInput::Table(TableInput::EditCell { .. }))
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Table(TableInput::EditCell {
            id,
            representation_id,
            object_id,
            field,
            value,
        }) = input
        {
            if let RepresentationState::Table(_) = state {
                if !model.set_field(object_id, field, serde_json::Value::String(value.clone())) {
                    return (
                        Payload::error(id.clone(), format!("no such object: {object_id}")),
                        ChangeDescription::nothing(input),
                    );
                }
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

pub struct ResizeTableColumnHandler;

impl EventHandler for ResizeTableColumnHandler {
    fn name(&self) -> &'static str {
        "ResizeTableColumnHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(
            input,
            RepresentationInput::Table(TableInput::ResizeColumn { .. })
        )
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Table(TableInput::ResizeColumn {
            id,
            representation_id,
            column_id,
            width,
        }) = input
        {
            if let RepresentationState::Table(table) = state {
                table.column_widths.insert(column_id.clone(), *width);
                table.record(TableLayoutEvent::ColumnResized {
                    column_id: column_id.clone(),
                    width: *width,
                });
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::TableLayoutChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}

pub struct ResizeTableRowHandler;

impl EventHandler for ResizeTableRowHandler {
    fn name(&self) -> &'static str {
        "ResizeTableRowHandler"
    }

    fn can_handle(&self, input: &RepresentationInput) -> bool {
        matches!(input, RepresentationInput::Table(TableInput::ResizeRow { .. }))
    }

    fn handle(
        &self,
        input: &RepresentationInput,
        state: &mut RepresentationState,
        _model: &mut SemanticModel,
    ) -> (Payload, ChangeDescription) {
        if let RepresentationInput::Table(TableInput::ResizeRow {
            id,
            representation_id,
            row_id,
            height,
        }) = input
        {
            if let RepresentationState::Table(table) = state {
                table.row_heights.insert(row_id.clone(), *height);
                table.record(TableLayoutEvent::RowResized {
                    row_id: row_id.clone(),
                    height: *height,
                });
                return (
                    Payload::success(id.clone()),
                    ChangeDescription::new(
                        ChangeKind::TableLayoutChange,
                        representation_id.clone(),
                        input.clone(),
                    ),
                );
            }
        }
        invalid_input(self, input)
    }
}
