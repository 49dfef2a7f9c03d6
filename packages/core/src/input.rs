//! Typed client inputs.
//!
//! Inputs are immutable commands targeting one representation. Each variant
//! carries its own request id and representation id so the session can
//! correlate replies and changes without any out-of-band bookkeeping. The
//! unions are closed per representation family; handlers recognize the
//! variants they can execute.

use crate::id::{RepresentationId, RequestId};
use crate::representation::RepresentationKind;
use serde::{Deserialize, Serialize};

/// Inputs targeting table representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableInput {
    /// Discard every custom row height and fall back to the computed layout.
    ResetRowsHeight {
        id: RequestId,
        representation_id: RepresentationId,
    },
    /// Write a new value into one cell, backed by the semantic model.
    EditCell {
        id: RequestId,
        representation_id: RepresentationId,
        object_id: String,
        field: String,
        value: String,
    },
    ResizeColumn {
        id: RequestId,
        representation_id: RepresentationId,
        column_id: String,
        width: u32,
    },
    ResizeRow {
        id: RequestId,
        representation_id: RepresentationId,
        row_id: String,
        height: u32,
    },
}

/// Inputs targeting tree representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TreeInput {
    ExpandItem {
        id: RequestId,
        representation_id: RepresentationId,
        item_id: String,
    },
    CollapseItem {
        id: RequestId,
        representation_id: RepresentationId,
        item_id: String,
    },
}

/// Inputs targeting form representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormInput {
    /// Edit a textfield widget; the value is written through to the
    /// semantic model object the widget is bound to.
    EditTextfield {
        id: RequestId,
        representation_id: RepresentationId,
        widget_id: String,
        object_id: String,
        field: String,
        value: String,
    },
    PushButton {
        id: RequestId,
        representation_id: RepresentationId,
        button_id: String,
    },
}

/// Inputs targeting diagram representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiagramInput {
    MoveNode {
        id: RequestId,
        representation_id: RepresentationId,
        node_id: String,
        x: f64,
        y: f64,
    },
    /// Discard manual node positions and request a full automatic layout.
    LayoutDiagram {
        id: RequestId,
        representation_id: RepresentationId,
    },
}

/// Inputs targeting the selection representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SelectionInput {
    UpdateSelection {
        id: RequestId,
        representation_id: RepresentationId,
        object_ids: Vec<String>,
    },
}

/// The closed union of every input the platform accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RepresentationInput {
    Table(TableInput),
    Tree(TreeInput),
    Form(FormInput),
    Diagram(DiagramInput),
    Selection(SelectionInput),
}

impl TableInput {
    pub fn request_id(&self) -> &RequestId {
        match self {
            TableInput::ResetRowsHeight { id, .. } => id,
            TableInput::EditCell { id, .. } => id,
            TableInput::ResizeColumn { id, .. } => id,
            TableInput::ResizeRow { id, .. } => id,
        }
    }

    pub fn representation_id(&self) -> &RepresentationId {
        match self {
            TableInput::ResetRowsHeight {
                representation_id, ..
            } => representation_id,
            TableInput::EditCell {
                representation_id, ..
            } => representation_id,
            TableInput::ResizeColumn {
                representation_id, ..
            } => representation_id,
            TableInput::ResizeRow {
                representation_id, ..
            } => representation_id,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            TableInput::ResetRowsHeight { .. } => "ResetTableRowsHeight",
            TableInput::EditCell { .. } => "EditTableCell",
            TableInput::ResizeColumn { .. } => "ResizeTableColumn",
            TableInput::ResizeRow { .. } => "ResizeTableRow",
        }
    }
}

impl TreeInput {
    pub fn request_id(&self) -> &RequestId {
        match self {
            TreeInput::ExpandItem { id, .. } => id,
            TreeInput::CollapseItem { id, .. } => id,
        }
    }

    pub fn representation_id(&self) -> &RepresentationId {
        match self {
            TreeInput::ExpandItem {
                representation_id, ..
            } => representation_id,
            TreeInput::CollapseItem {
                representation_id, ..
            } => representation_id,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            TreeInput::ExpandItem { .. } => "ExpandTreeItem",
            TreeInput::CollapseItem { .. } => "CollapseTreeItem",
        }
    }
}

impl FormInput {
    pub fn request_id(&self) -> &RequestId {
        match self {
            FormInput::EditTextfield { id, .. } => id,
            FormInput::PushButton { id, .. } => id,
        }
    }

    pub fn representation_id(&self) -> &RepresentationId {
        match self {
            FormInput::EditTextfield {
                representation_id, ..
            } => representation_id,
            FormInput::PushButton {
                representation_id, ..
            } => representation_id,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            FormInput::EditTextfield { .. } => "EditFormTextfield",
            FormInput::PushButton { .. } => "PushFormButton",
        }
    }
}

impl DiagramInput {
    pub fn request_id(&self) -> &RequestId {
        match self {
            DiagramInput::MoveNode { id, .. } => id,
            DiagramInput::LayoutDiagram { id, .. } => id,
        }
    }

    pub fn representation_id(&self) -> &RepresentationId {
        match self {
            DiagramInput::MoveNode {
                representation_id, ..
            } => representation_id,
            DiagramInput::LayoutDiagram {
                representation_id, ..
            } => representation_id,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            DiagramInput::MoveNode { .. } => "MoveDiagramNode",
            DiagramInput::LayoutDiagram { .. } => "LayoutDiagram",
        }
    }
}

impl SelectionInput {
    pub fn request_id(&self) -> &RequestId {
        match self {
            SelectionInput::UpdateSelection { id, .. } => id,
        }
    }

    pub fn representation_id(&self) -> &RepresentationId {
        match self {
            SelectionInput::UpdateSelection {
                representation_id, ..
            } => representation_id,
        }
    }

    pub fn variant_name(&self) -> &'static str {
        match self {
            SelectionInput::UpdateSelection { .. } => "UpdateSelection",
        }
    }
}

impl RepresentationInput {
    pub fn request_id(&self) -> &RequestId {
        match self {
            RepresentationInput::Table(input) => input.request_id(),
            RepresentationInput::Tree(input) => input.request_id(),
            RepresentationInput::Form(input) => input.request_id(),
            RepresentationInput::Diagram(input) => input.request_id(),
            RepresentationInput::Selection(input) => input.request_id(),
        }
    }

    pub fn representation_id(&self) -> &RepresentationId {
        match self {
            RepresentationInput::Table(input) => input.representation_id(),
            RepresentationInput::Tree(input) => input.representation_id(),
            RepresentationInput::Form(input) => input.representation_id(),
            RepresentationInput::Diagram(input) => input.representation_id(),
            RepresentationInput::Selection(input) => input.representation_id(),
        }
    }

    /// Stable name of the concrete variant, used in diagnostics and the
    /// unsupported-input error message.
    pub fn variant_name(&self) -> &'static str {
        match self {
            RepresentationInput::Table(input) => input.variant_name(),
            RepresentationInput::Tree(input) => input.variant_name(),
            RepresentationInput::Form(input) => input.variant_name(),
            RepresentationInput::Diagram(input) => input.variant_name(),
            RepresentationInput::Selection(input) => input.variant_name(),
        }
    }

    /// The representation family this input belongs to.
    pub fn kind(&self) -> RepresentationKind {
        match self {
            RepresentationInput::Table(_) => RepresentationKind::Table,
            RepresentationInput::Tree(_) => RepresentationKind::Tree,
            RepresentationInput::Form(_) => RepresentationKind::Form,
            RepresentationInput::Diagram(_) => RepresentationKind::Diagram,
            RepresentationInput::Selection(_) => RepresentationKind::Selection,
        }
    }
}
