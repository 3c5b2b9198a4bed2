//! JSON graph loader.
//!
//! Accepted document shape:
//!
//! ```json
//! {"nodes": [[id, {attrs}], ...], "edges": [[source, target, {attrs}], ...]}
//! ```
//!
//! optionally wrapped in an outer array, in which case the first element is used.

use crate::attrs::{AttrBag, NodeId};
use crate::error::{Error, Result};
use crate::graph::AttributedGraph;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

type RawAttrs = IndexMap<String, Value>;

#[derive(Debug, Deserialize)]
struct GraphDocument {
    nodes: Vec<(Value, RawAttrs)>,
    edges: Vec<(Value, Value, RawAttrs)>,
}

/// Reads and parses a graph document from `path`.
pub fn load_graph(path: impl AsRef<Path>) -> Result<AttributedGraph> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_graph_at(&text, path)?;
    tracing::info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Parses a graph document from JSON text.
pub fn parse_graph(text: &str) -> Result<AttributedGraph> {
    parse_graph_at(text, Path::new("<memory>"))
}

fn parse_graph_at(text: &str, path: &Path) -> Result<AttributedGraph> {
    let value: Value = serde_json::from_str(text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    graph_from_value_at(value, path)
}

/// Builds a graph from an already parsed JSON value.
pub fn graph_from_value(value: Value) -> Result<AttributedGraph> {
    graph_from_value_at(value, Path::new("<memory>"))
}

fn graph_from_value_at(value: Value, path: &Path) -> Result<AttributedGraph> {
    let shape = |message: String| Error::Shape {
        path: PathBuf::from(path),
        message,
    };

    let value = match value {
        Value::Array(items) => {
            let count = items.len();
            let Some(first) = items.into_iter().next() else {
                return Err(shape("top-level array is empty".to_string()));
            };
            if count > 1 {
                tracing::warn!(
                    path = %path.display(),
                    count,
                    "top-level array holds more than one graph; using the first"
                );
            }
            first
        }
        other => other,
    };
    if !value.is_object() {
        return Err(shape(format!(
            "expected an object with `nodes` and `edges`, found {}",
            json_kind(&value)
        )));
    }

    let doc: GraphDocument =
        serde_json::from_value(value).map_err(|err| shape(err.to_string()))?;

    let mut graph = AttributedGraph::new();
    for (id, attrs) in doc.nodes {
        graph.add_node(node_id(&id)?, AttrBag::from(attrs));
    }
    for (source, target, attrs) in doc.edges {
        graph.add_edge(node_id(&source)?, node_id(&target)?, AttrBag::from(attrs));
    }
    Ok(graph)
}

fn node_id(value: &Value) -> Result<NodeId> {
    NodeId::from_json(value).ok_or_else(|| Error::InvalidNodeId {
        value: value.to_string(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wrapped_and_bare_documents_load_the_same_graph() {
        let doc = json!({
            "nodes": [[0, {"type": "hole"}], [1, {"type": "pocket"}]],
            "edges": [[0, 1, {"angular_type": "convex"}]]
        });
        let bare = graph_from_value(doc.clone()).expect("bare");
        let wrapped = graph_from_value(json!([doc])).expect("wrapped");

        assert_eq!(bare.node_count(), wrapped.node_count());
        assert_eq!(bare.edge_count(), wrapped.edge_count());
        assert_eq!(wrapped.type_label(&NodeId::number(1)), "pocket");
    }

    #[test]
    fn empty_outer_array_is_a_shape_error() {
        let err = graph_from_value(json!([])).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }), "got {err:?}");
    }

    #[test]
    fn missing_edges_key_is_a_shape_error() {
        let err = graph_from_value(json!({ "nodes": [] })).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }), "got {err:?}");
    }

    #[test]
    fn node_entry_without_attributes_is_a_shape_error() {
        let err = graph_from_value(json!({ "nodes": [[0]], "edges": [] })).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }), "got {err:?}");
    }

    #[test]
    fn boolean_node_id_is_rejected() {
        let err =
            graph_from_value(json!({ "nodes": [[true, {}]], "edges": [] })).unwrap_err();
        assert!(matches!(err, Error::InvalidNodeId { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_json_text_is_reported() {
        let err = parse_graph("{ nodes: ").unwrap_err();
        assert!(matches!(err, Error::Json { .. }), "got {err:?}");
    }
}
