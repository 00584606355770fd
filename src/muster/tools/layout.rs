use serde::Serialize;

use crate::muster::tools::error::{Result, ToolError};
use crate::muster::tools::model::UnitSummary;

/// Horizontal offset shared by every node card.
pub const NODE_X: f64 = 200.0;
/// Vertical distance between the tops of consecutive node cards.
pub const VERTICAL_SPACING: f64 = 120.0;
/// Width assigned to every node card.
pub const NODE_WIDTH: f64 = 250.0;

/// Absolute canvas coordinates of a node's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One unit card in the chart. The label carries the category breakdown as
/// `Officer/Enlisted/Civilian/Total`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramNode {
    /// Node identifier, equal to the unit name.
    pub id: String,
    /// Count line rendered underneath the unit name.
    pub label: String,
    /// Top-left corner of the card.
    pub position: Position,
    /// Card width.
    pub width: f64,
}

/// Directed connector from the root unit to another unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagramEdge {
    /// Edge identifier, `{source}-{target}`.
    pub id: String,
    /// Unit the edge starts at.
    pub source: String,
    /// Unit the edge points to.
    pub target: String,
}

/// Which unit anchors the star of edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RootSelection {
    /// Use the first unit the roster produced.
    #[default]
    FirstSeen,
    /// Use the named unit, which must exist in the summary.
    Named(String),
}

/// Immutable chart layout: node cards plus the root-anchored star of edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diagram {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl Diagram {
    /// Whether the diagram holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by its identifier.
    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

/// Builds the chart layout for a summary.
///
/// Units become a single vertical column of cards in first-seen order. Every
/// unit except the root receives one edge from the root. An empty summary
/// produces an empty diagram, regardless of the root selection.
pub fn build_diagram(summary: &UnitSummary, root: &RootSelection) -> Result<Diagram> {
    let Some(first_unit) = summary.first_unit() else {
        return Ok(Diagram::default());
    };
    let root = match root {
        RootSelection::FirstSeen => first_unit,
        RootSelection::Named(unit) => {
            if summary.get(unit).is_none() {
                return Err(ToolError::UnknownRoot { unit: unit.clone() });
            }
            unit.as_str()
        }
    };

    let mut nodes = Vec::with_capacity(summary.len());
    let mut edges = Vec::with_capacity(summary.len().saturating_sub(1));
    for (index, (unit, counts)) in summary.iter().enumerate() {
        nodes.push(DiagramNode {
            id: unit.to_string(),
            label: format!(
                "{}/{}/{}/{}",
                counts.officer,
                counts.enlisted,
                counts.civilian,
                counts.total()
            ),
            position: Position {
                x: NODE_X,
                y: VERTICAL_SPACING * index as f64,
            },
            width: NODE_WIDTH,
        });
        if unit != root {
            edges.push(DiagramEdge {
                id: format!("{root}-{unit}"),
                source: root.to_string(),
                target: unit.to_string(),
            });
        }
    }

    Ok(Diagram { nodes, edges })
}
