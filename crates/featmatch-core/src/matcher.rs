//! Attribute-matched subgraph search.
//!
//! The search itself is petgraph's VF2 implementation; this module only supplies the attribute
//! predicates and converts petgraph's index mappings back into node ids.

use crate::attrs::NodeId;
use crate::graph::{AttributedGraph, EdgeData, NodeData};
use petgraph::algo::subgraph_isomorphisms_iter;
use petgraph::graph::NodeIndex;

/// One embedding of the feature graph: feature node id → workpiece node id.
///
/// Pairs are kept in feature-node insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pairs: Vec<(NodeId, NodeId)>,
}

impl Match {
    pub fn new(pairs: Vec<(NodeId, NodeId)>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(NodeId, NodeId)] {
        &self.pairs
    }

    /// Workpiece image of a feature node.
    pub fn image_of(&self, feature_node: &NodeId) -> Option<&NodeId> {
        self.pairs
            .iter()
            .find(|(f, _)| f == feature_node)
            .map(|(_, w)| w)
    }

    /// Workpiece nodes covered by this match, in feature-node order.
    pub fn workpiece_nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.pairs.iter().map(|(_, w)| w)
    }

    /// Workpiece edges that are images of `feature`'s edges, in feature-edge order.
    pub fn induced_edges(&self, feature: &AttributedGraph) -> Vec<(NodeId, NodeId)> {
        feature
            .edges()
            .filter_map(|e| {
                let a = self.image_of(e.source)?;
                let b = self.image_of(e.target)?;
                Some((a.clone(), b.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSummary {
    pub found: bool,
    pub count: usize,
}

impl MatchSummary {
    pub fn of(matches: &[Match]) -> Self {
        Self {
            found: !matches.is_empty(),
            count: matches.len(),
        }
    }
}

fn nodes_match(feature: &NodeData, workpiece: &NodeData) -> bool {
    feature.attrs.node_type() == workpiece.attrs.node_type()
}

fn edges_match(feature: &EdgeData, workpiece: &EdgeData) -> bool {
    feature.attrs.angular_type() == workpiece.attrs.angular_type()
}

/// Enumerates every induced embedding of `feature` in `workpiece`.
///
/// Nodes must agree on `type` and edges on `angular_type`; a missing attribute only matches a
/// missing attribute. Embeddings are induced: two mapped workpiece nodes may only be adjacent when
/// their feature nodes are, so a three-node path does not embed in a triangle. There is no limit
/// on the number of embeddings returned.
pub fn find_subgraph_matches(workpiece: &AttributedGraph, feature: &AttributedGraph) -> Vec<Match> {
    let pattern = feature.petgraph();
    let target = workpiece.petgraph();
    let mut node_match = nodes_match;
    let mut edge_match = edges_match;

    let Some(mappings) =
        subgraph_isomorphisms_iter(&pattern, &target, &mut node_match, &mut edge_match)
    else {
        tracing::debug!(
            feature_nodes = feature.node_count(),
            workpiece_nodes = workpiece.node_count(),
            "feature graph is larger than the workpiece graph"
        );
        return Vec::new();
    };

    let matches: Vec<Match> = mappings
        .map(|mapping| {
            let pairs = mapping
                .iter()
                .enumerate()
                .map(|(f, &w)| {
                    (
                        pattern[NodeIndex::new(f)].id.clone(),
                        target[NodeIndex::new(w)].id.clone(),
                    )
                })
                .collect();
            Match::new(pairs)
        })
        .collect();

    let summary = MatchSummary::of(&matches);
    if summary.found {
        tracing::info!(count = summary.count, "feature graph found as subgraph");
    } else {
        tracing::info!("feature graph not found as subgraph");
    }
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::graph_from_value;
    use serde_json::json;

    #[test]
    fn oversized_pattern_yields_no_matches() {
        let small = graph_from_value(json!({
            "nodes": [[0, {"type": "a"}]],
            "edges": []
        }))
        .expect("small");
        let big = graph_from_value(json!({
            "nodes": [[0, {"type": "a"}], [1, {"type": "a"}]],
            "edges": [[0, 1, {}]]
        }))
        .expect("big");

        assert!(find_subgraph_matches(&small, &big).is_empty());
    }

    #[test]
    fn missing_type_only_matches_missing_type() {
        let workpiece = graph_from_value(json!({
            "nodes": [[0, {}], [1, {"type": "hole"}]],
            "edges": []
        }))
        .expect("workpiece");
        let feature = graph_from_value(json!({
            "nodes": [["f", {}]],
            "edges": []
        }))
        .expect("feature");

        let matches = find_subgraph_matches(&workpiece, &feature);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].image_of(&"f".into()), Some(&NodeId::number(0)));
    }

    #[test]
    fn induced_edges_follow_feature_edge_order() {
        let m = Match::new(vec![
            ("x".into(), "10".into()),
            ("y".into(), "11".into()),
            ("z".into(), "12".into()),
        ]);
        let feature = graph_from_value(json!({
            "nodes": [["x", {}], ["y", {}], ["z", {}]],
            "edges": [["y", "z", {}], ["x", "y", {}]]
        }))
        .expect("feature");

        assert_eq!(
            m.induced_edges(&feature),
            vec![
                (NodeId::from("11"), NodeId::from("12")),
                (NodeId::from("10"), NodeId::from("11")),
            ]
        );
    }
}
