//! Match colouring and per-match table rows.

use crate::attrs::{EdgeClass, NodeId};
use crate::graph::AttributedGraph;
use crate::matcher::Match;

/// Colours assigned to matches, cycled by match index.
pub const PALETTE: [&str; 8] = [
    "red", "blue", "green", "orange", "purple", "pink", "brown", "cyan",
];

pub const BASE_NODE_COLOR: &str = "lightgray";
pub const BASE_EDGE_COLOR: &str = "gray";

/// Colour for the `index`-th (0-based) match. Repeats once matches outnumber the palette.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Per-node and per-edge colours, indexed by graph position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorOverlay {
    pub nodes: Vec<&'static str>,
    pub edges: Vec<&'static str>,
}

impl ColorOverlay {
    pub fn uniform(graph: &AttributedGraph, node: &'static str, edge: &'static str) -> Self {
        Self {
            nodes: vec![node; graph.node_count()],
            edges: vec![edge; graph.edge_count()],
        }
    }

    pub fn node(&self, position: usize) -> &'static str {
        self.nodes.get(position).copied().unwrap_or(BASE_NODE_COLOR)
    }

    pub fn edge(&self, position: usize) -> &'static str {
        self.edges.get(position).copied().unwrap_or(BASE_EDGE_COLOR)
    }
}

/// One table row describing a single match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRow {
    /// 1-based match number.
    pub index: usize,
    pub node_ids: Vec<NodeId>,
    pub node_types: Vec<String>,
    /// Edges rendered as `(typeA - typeB)`.
    pub edge_names: Vec<String>,
    pub edge_classes: Vec<EdgeClass>,
    pub color: &'static str,
}

#[derive(Debug, Clone)]
pub struct Highlight {
    pub overlay: ColorOverlay,
    pub rows: Vec<MatchRow>,
}

impl Highlight {
    pub fn has_matches(&self) -> bool {
        !self.rows.is_empty()
    }
}

/// Colours every match onto a shared overlay and builds one row per match.
///
/// Matches are applied in order, so a node or edge shared by several matches keeps the colour of
/// the last one.
pub fn highlight_matches(
    workpiece: &AttributedGraph,
    feature: &AttributedGraph,
    matches: &[Match],
) -> Highlight {
    let mut overlay = ColorOverlay::uniform(workpiece, BASE_NODE_COLOR, BASE_EDGE_COLOR);
    let mut rows = Vec::with_capacity(matches.len());

    for (i, m) in matches.iter().enumerate() {
        let color = palette_color(i);
        let edges = m.induced_edges(feature);

        let node_ids: Vec<NodeId> = m.workpiece_nodes().cloned().collect();
        for id in &node_ids {
            if let Some(pos) = workpiece.node_position(id) {
                overlay.nodes[pos] = color;
            }
        }

        let mut edge_names = Vec::with_capacity(edges.len());
        let mut edge_classes = Vec::with_capacity(edges.len());
        for (a, b) in &edges {
            if let Some(pos) = workpiece.edge_position(a, b) {
                overlay.edges[pos] = color;
            }
            edge_names.push(format!(
                "({} - {})",
                workpiece.type_label(a),
                workpiece.type_label(b)
            ));
            edge_classes.push(workpiece.edge_class(a, b).unwrap_or(EdgeClass::Concave));
        }

        let node_types = node_ids
            .iter()
            .map(|id| workpiece.type_label(id).into_owned())
            .collect();

        rows.push(MatchRow {
            index: i + 1,
            node_ids,
            node_types,
            edge_names,
            edge_classes,
            color,
        });
    }

    Highlight { overlay, rows }
}
