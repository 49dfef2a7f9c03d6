//! Representation descriptions and live state.
//!
//! A description is read-only metadata loaded with the project; it tells the
//! session which kind of state to construct on first access to a
//! representation id. The state itself is mutated only by handlers running
//! inside the owning session's serial turn.

use crate::id::RepresentationId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The representation families the platform supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepresentationKind {
    Table,
    Tree,
    Form,
    Diagram,
    Selection,
}

/// Read-only metadata describing one representation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepresentationDescription {
    pub id: RepresentationId,
    pub kind: RepresentationKind,
    pub label: String,
}

impl RepresentationDescription {
    pub fn new(
        id: impl Into<RepresentationId>,
        kind: RepresentationKind,
        label: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
        }
    }
}

/// Layout events accumulated by a table representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableLayoutEvent {
    RowsHeightReset,
    RowResized { row_id: String, height: u32 },
    ColumnResized { column_id: String, width: u32 },
}

/// Live state of one table representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    /// Custom row heights, keyed by row id. Absent rows use computed layout.
    pub row_heights: HashMap<String, u32>,
    /// Custom column widths, keyed by column id.
    pub column_widths: HashMap<String, u32>,
    /// Ordered layout events since the representation was opened.
    pub layout_events: Vec<TableLayoutEvent>,
}

impl TableState {
    pub fn record(&mut self, event: TableLayoutEvent) {
        self.layout_events.push(event);
    }
}

/// Live state of one tree representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeState {
    pub expanded: HashSet<String>,
}

/// Live state of one form representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    /// Last value shown per widget id.
    pub values: HashMap<String, String>,
    /// Click counts per button id.
    pub button_clicks: HashMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Layout events accumulated by a diagram representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiagramLayoutEvent {
    NodeMoved { node_id: String, position: Position },
    FullLayoutRequested,
}

/// Live state of one diagram representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramState {
    /// Manual node positions, keyed by node id.
    pub positions: HashMap<String, Position>,
    pub layout_events: Vec<DiagramLayoutEvent>,
}

impl DiagramState {
    pub fn record(&mut self, event: DiagramLayoutEvent) {
        self.layout_events.push(event);
    }
}

/// Live state of the selection representation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selected object ids, in selection order.
    pub selected: Vec<String>,
}

/// Mutable state of one live representation instance.
///
/// Closed over the supported families; constructed lazily from the matching
/// description on first access within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RepresentationState {
    Table(TableState),
    Tree(TreeState),
    Form(FormState),
    Diagram(DiagramState),
    Selection(SelectionState),
}

impl RepresentationState {
    /// Fresh state for a representation of the described kind.
    pub fn new_for(description: &RepresentationDescription) -> Self {
        match description.kind {
            RepresentationKind::Table => RepresentationState::Table(TableState::default()),
            RepresentationKind::Tree => RepresentationState::Tree(TreeState::default()),
            RepresentationKind::Form => RepresentationState::Form(FormState::default()),
            RepresentationKind::Diagram => RepresentationState::Diagram(DiagramState::default()),
            RepresentationKind::Selection => {
                RepresentationState::Selection(SelectionState::default())
            }
        }
    }

    pub fn kind(&self) -> RepresentationKind {
        match self {
            RepresentationState::Table(_) => RepresentationKind::Table,
            RepresentationState::Tree(_) => RepresentationKind::Tree,
            RepresentationState::Form(_) => RepresentationKind::Form,
            RepresentationState::Diagram(_) => RepresentationKind::Diagram,
            RepresentationState::Selection(_) => RepresentationKind::Selection,
        }
    }
}
