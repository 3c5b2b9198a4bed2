//! Attributed undirected graph backed by `petgraph`.

use crate::attrs::{AttrBag, EdgeClass, NodeId};
use indexmap::IndexMap;
use petgraph::graph::{EdgeIndex, NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use std::borrow::Cow;

#[derive(Debug, Clone)]
pub struct NodeData {
    pub id: NodeId,
    pub attrs: AttrBag,
}

#[derive(Debug, Clone, Default)]
pub struct EdgeData {
    pub attrs: AttrBag,
}

/// Borrowed view of one edge: its endpoints in insertion orientation plus attributes.
#[derive(Debug, Clone, Copy)]
pub struct EdgeView<'a> {
    pub position: usize,
    pub source: &'a NodeId,
    pub target: &'a NodeId,
    pub attrs: &'a AttrBag,
}

/// Undirected graph whose nodes carry an id plus attributes and whose edges carry attributes.
///
/// Graphs are built once by the loader and not mutated afterwards. Node and edge positions follow
/// insertion order and are stable for the lifetime of the graph.
#[derive(Debug, Clone, Default)]
pub struct AttributedGraph {
    graph: UnGraph<NodeData, EdgeData>,
    index: IndexMap<NodeId, NodeIndex>,
}

impl AttributedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, or merges `attrs` into the existing node with the same id.
    pub fn add_node(&mut self, id: NodeId, attrs: AttrBag) -> usize {
        if let Some(&ix) = self.index.get(&id) {
            self.graph[ix].attrs.merge(attrs);
            return ix.index();
        }
        let ix = self.graph.add_node(NodeData {
            id: id.clone(),
            attrs,
        });
        self.index.insert(id, ix);
        ix.index()
    }

    /// Adds an undirected edge, or merges `attrs` into the existing edge between the same pair.
    ///
    /// Unknown endpoints are created with empty attributes.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, attrs: AttrBag) -> usize {
        let a = self.ensure_node(source);
        let b = self.ensure_node(target);
        if let Some(ex) = self.graph.find_edge(a, b) {
            self.graph[ex].attrs.merge(attrs);
            return ex.index();
        }
        self.graph.add_edge(a, b, EdgeData { attrs }).index()
    }

    fn ensure_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&ix) = self.index.get(&id) {
            return ix;
        }
        tracing::warn!(node = %id, "edge references an undeclared node; adding it without attributes");
        let ix = self.graph.add_node(NodeData {
            id: id.clone(),
            attrs: AttrBag::new(),
        });
        self.index.insert(id, ix);
        ix
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.graph.node_weights().map(|n| &n.id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeData> {
        self.graph.node_weights()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> {
        self.graph.edge_references().map(|e| EdgeView {
            position: e.id().index(),
            source: &self.graph[e.source()].id,
            target: &self.graph[e.target()].id,
            attrs: &e.weight().attrs,
        })
    }

    pub fn node_position(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).map(|ix| ix.index())
    }

    pub fn node_at(&self, position: usize) -> Option<&NodeData> {
        self.graph.node_weight(NodeIndex::new(position))
    }

    pub fn node_attrs(&self, id: &NodeId) -> Option<&AttrBag> {
        self.index.get(id).map(|&ix| &self.graph[ix].attrs)
    }

    /// Position of the edge joining `a` and `b` (either orientation).
    pub fn edge_position(&self, a: &NodeId, b: &NodeId) -> Option<usize> {
        self.find_edge(a, b).map(|ex| ex.index())
    }

    pub fn edge_attrs(&self, a: &NodeId, b: &NodeId) -> Option<&AttrBag> {
        self.find_edge(a, b).map(|ex| &self.graph[ex].attrs)
    }

    fn find_edge(&self, a: &NodeId, b: &NodeId) -> Option<EdgeIndex> {
        let a = *self.index.get(a)?;
        let b = *self.index.get(b)?;
        self.graph.find_edge(a, b)
    }

    /// The node's `type` attribute as text, falling back to its id.
    pub fn type_label<'a>(&'a self, id: &'a NodeId) -> Cow<'a, str> {
        match self.node_attrs(id) {
            Some(attrs) => attrs.str_or(crate::attrs::NODE_TYPE_KEY, id.as_str()),
            None => Cow::Borrowed(id.as_str()),
        }
    }

    /// `CX`/`CC` classification of the edge joining `a` and `b`, if that edge exists.
    pub fn edge_class(&self, a: &NodeId, b: &NodeId) -> Option<EdgeClass> {
        self.edge_attrs(a, b).map(EdgeClass::of)
    }

    pub(crate) fn petgraph(&self) -> &UnGraph<NodeData, EdgeData> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn typed(t: &str) -> AttrBag {
        let mut attrs = AttrBag::new();
        attrs.insert("type", json!(t));
        attrs
    }

    #[test]
    fn edges_are_undirected_and_merge_on_repeat() {
        let mut g = AttributedGraph::new();
        g.add_node("a".into(), typed("hole"));
        g.add_node("b".into(), typed("pocket"));

        let mut convex = AttrBag::new();
        convex.insert("angular_type", json!("convex"));
        let first = g.add_edge("a".into(), "b".into(), AttrBag::new());
        let second = g.add_edge("b".into(), "a".into(), convex);

        assert_eq!(first, second);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_class(&"a".into(), &"b".into()), Some(EdgeClass::Convex));
        assert_eq!(g.edge_class(&"b".into(), &"a".into()), Some(EdgeClass::Convex));
    }

    #[test]
    fn edge_to_unknown_node_creates_it() {
        let mut g = AttributedGraph::new();
        g.add_node("a".into(), typed("hole"));
        g.add_edge("a".into(), "z".into(), AttrBag::new());

        assert_eq!(g.node_count(), 2);
        assert!(g.node_attrs(&"z".into()).is_some_and(AttrBag::is_empty));
    }

    #[test]
    fn type_label_falls_back_to_id() {
        let mut g = AttributedGraph::new();
        g.add_node("a".into(), typed("hole"));
        g.add_node("7".into(), AttrBag::new());

        assert_eq!(g.type_label(&"a".into()), "hole");
        assert_eq!(g.type_label(&"7".into()), "7");
        assert_eq!(g.type_label(&"missing".into()), "missing");
    }

    #[test]
    fn repeated_node_merges_attributes() {
        let mut g = AttributedGraph::new();
        let p0 = g.add_node("a".into(), typed("hole"));
        let mut extra = AttrBag::new();
        extra.insert("depth", json!(2));
        let p1 = g.add_node("a".into(), extra);

        assert_eq!(p0, p1);
        assert_eq!(g.node_count(), 1);
        let attrs = g.node_attrs(&"a".into()).expect("node");
        assert_eq!(attrs.len(), 2);
    }
}
