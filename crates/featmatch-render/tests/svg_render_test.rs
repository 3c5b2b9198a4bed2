use featmatch_core::{
    AttributedGraph, BASE_EDGE_COLOR, BASE_NODE_COLOR, ColorOverlay, graph_from_value,
};
use featmatch_layout::{LayoutResult, Point};
use featmatch_render::{Error, SvgRenderOptions, render_graph_svg};
use serde_json::json;

fn sample() -> AttributedGraph {
    graph_from_value(json!({
        "nodes": [
            [1, {"type": "plane"}],
            [2, {"type": "pocket_wall"}],
            [3, {}]
        ],
        "edges": [
            [1, 2, {"angular_type": "convex"}],
            [2, 3, {"angular_type": "concave"}]
        ]
    }))
    .expect("graph")
}

fn sample_layout() -> LayoutResult {
    let mut layout = LayoutResult::default();
    layout.positions.insert("1".into(), Point { x: -1.0, y: 0.0 });
    layout.positions.insert("2".into(), Point { x: 0.0, y: 1.0 });
    layout.positions.insert("3".into(), Point { x: 1.0, y: -1.0 });
    layout
}

fn default_colors(graph: &AttributedGraph) -> ColorOverlay {
    ColorOverlay::uniform(graph, "lightblue", "gray")
}

#[test]
fn labels_view_draws_types_and_edge_classes() {
    let g = sample();
    let svg = render_graph_svg(
        &g,
        &sample_layout(),
        &default_colors(&g),
        &SvgRenderOptions::labels("Workpiece Graph (Labels)"),
    )
    .unwrap();

    assert!(svg.starts_with("<svg "));
    assert!(svg.contains(r#"width="1000""#));
    assert!(svg.contains(r#"height="800""#));
    assert!(svg.contains("Workpiece Graph (Labels)"));
    assert!(svg.contains(">plane</text>"));
    assert!(svg.contains(">pocket_wall</text>"));
    // Node 3 has no type and falls back to its id.
    assert!(svg.contains(">3</text>"));
    assert!(svg.contains(">CX</text>"));
    assert!(svg.contains(">CC</text>"));
    assert_eq!(svg.matches("<circle ").count(), 3);
    assert_eq!(svg.matches("<line ").count(), 2);
    assert_eq!(svg.matches(r#"fill="lightblue""#).count(), 3);
}

#[test]
fn numbers_view_draws_ids_without_edge_labels() {
    let g = sample();
    let svg = render_graph_svg(
        &g,
        &sample_layout(),
        &default_colors(&g),
        &SvgRenderOptions::numbers("Workpiece Graph (Numbers)"),
    )
    .unwrap();

    assert!(svg.contains(">1</text>"));
    assert!(svg.contains(">2</text>"));
    assert!(!svg.contains(">plane</text>"));
    assert!(!svg.contains(">CX</text>"));
    assert!(!svg.contains("edge-labels"));
}

#[test]
fn overlay_colours_are_applied_per_element() {
    let g = sample();
    let mut colors = ColorOverlay::uniform(&g, BASE_NODE_COLOR, BASE_EDGE_COLOR);
    colors.nodes[1] = "red";
    colors.edges[0] = "red";
    let svg = render_graph_svg(
        &g,
        &sample_layout(),
        &colors,
        &SvgRenderOptions::overlay("Workpiece Graph with highlighted subgraphs"),
    )
    .unwrap();

    assert_eq!(svg.matches(r#"fill="red""#).count(), 1);
    assert_eq!(svg.matches(r#"stroke="red""#).count(), 1);
    assert_eq!(svg.matches(r#"fill="lightgray""#).count(), 2);
}

#[test]
fn title_text_is_escaped() {
    let g = sample();
    let svg = render_graph_svg(
        &g,
        &sample_layout(),
        &default_colors(&g),
        &SvgRenderOptions::labels("a < b & c"),
    )
    .unwrap();
    assert!(svg.contains("a &lt; b &amp; c"));
}

#[test]
fn missing_position_is_an_error() {
    let g = sample();
    let mut layout = sample_layout();
    layout.positions.remove("3");
    let err = render_graph_svg(
        &g,
        &layout,
        &default_colors(&g),
        &SvgRenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingPosition { ref node_id } if node_id == "3"));
}

#[test]
fn overlay_size_must_match_the_graph() {
    let g = sample();
    let mut colors = default_colors(&g);
    colors.edges.pop();
    let err = render_graph_svg(&g, &sample_layout(), &colors, &SvgRenderOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        Error::OverlayMismatch {
            what: "edges",
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn empty_graph_renders_a_blank_canvas() {
    let g = AttributedGraph::new();
    let svg = render_graph_svg(
        &g,
        &LayoutResult::default(),
        &ColorOverlay::uniform(&g, BASE_NODE_COLOR, BASE_EDGE_COLOR),
        &SvgRenderOptions::labels("empty"),
    )
    .unwrap();
    assert!(svg.contains("<rect "));
    assert!(!svg.contains("<circle "));
}

#[test]
fn numeric_and_string_ids_use_separate_positions() {
    let g = graph_from_value(json!({
        "nodes": [[3, {"type": "a"}], ["3", {"type": "b"}]],
        "edges": []
    }))
    .unwrap();
    let mut layout = LayoutResult::default();
    layout.positions.insert("3".into(), Point { x: 0.0, y: 0.0 });
    let err = render_graph_svg(
        &g,
        &layout,
        &default_colors(&g),
        &SvgRenderOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingPosition { .. }));

    layout
        .positions
        .insert(r#""3""#.into(), Point { x: 1.0, y: 1.0 });
    let svg = render_graph_svg(&g, &layout, &default_colors(&g), &SvgRenderOptions::default())
        .unwrap();
    assert_eq!(svg.matches("<circle ").count(), 2);
}
