//! Standalone interactive graph pages backed by vis-network.

use crate::Result;
use featmatch_core::{AttrBag, AttributedGraph};
use serde::Serialize;
use std::fmt::Write as _;

const VIS_NETWORK_JS: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

#[derive(Debug, Clone)]
pub struct InteractiveOptions {
    pub title: String,
    /// CSS height of the network canvas.
    pub height: String,
}

impl InteractiveOptions {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

impl Default for InteractiveOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            height: "750px".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct VisNode<'a> {
    id: String,
    label: &'a str,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

#[derive(Debug, Serialize)]
struct VisEdge {
    from: String,
    to: String,
    title: String,
}

/// One `key: value` line per attribute; plain text, vis-network renders it as a tooltip.
fn tooltip(head: &str, attrs: &AttrBag) -> String {
    let mut out = head.to_string();
    for (key, value) in attrs.iter() {
        let _ = match value {
            serde_json::Value::String(s) => write!(&mut out, "\n{key}: {s}"),
            other => write!(&mut out, "\n{key}: {other}"),
        };
    }
    out
}

/// Serialises `value` for embedding inside a `<script>` element.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

/// Renders `graph` as a self-contained HTML page with a pannable, draggable network view.
///
/// Node labels are node ids; tooltips list every attribute. vis ids are the JSON text of each id
/// so `3` and `"3"` stay separate nodes.
pub fn render_interactive_html(
    graph: &AttributedGraph,
    options: &InteractiveOptions,
) -> Result<String> {
    let nodes: Vec<VisNode<'_>> = graph
        .nodes()
        .map(|n| VisNode {
            id: n.id.key().into_owned(),
            label: n.id.as_str(),
            title: tooltip(n.id.as_str(), &n.attrs),
            group: n.attrs.get_str(featmatch_core::NODE_TYPE_KEY).map(str::to_string),
        })
        .collect();
    let edges: Vec<VisEdge> = graph
        .edges()
        .map(|e| VisEdge {
            from: e.source.key().into_owned(),
            to: e.target.key().into_owned(),
            title: tooltip(&format!("{} - {}", e.source, e.target), e.attrs),
        })
        .collect();

    let title = htmlize::escape_text(options.title.as_str());
    let height = htmlize::escape_attribute(options.height.as_str());
    let nodes_json = script_json(&nodes)?;
    let edges_json = script_json(&edges)?;

    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{VIS_NETWORK_JS}"></script>
<style>
body {{ font-family: Arial, sans-serif; margin: 0; }}
#graph {{ width: 100%; height: {height}; border: 1px solid lightgray; }}
</style>
</head>
<body>
<div id="graph"></div>
<script>
var nodes = new vis.DataSet({nodes_json});
var edges = new vis.DataSet({edges_json});
var network = new vis.Network(
  document.getElementById("graph"),
  {{ nodes: nodes, edges: edges }},
  {{ physics: {{ stabilization: true }}, interaction: {{ hover: true }} }}
);
</script>
</body>
</html>
"#
    );
    Ok(out)
}
