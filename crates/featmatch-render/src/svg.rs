//! Static SVG drawing of an attributed graph on a fixed layout.

use crate::util::{escape_xml, fmt};
use crate::{Error, Result};
use featmatch_core::{AttributedGraph, ColorOverlay, EdgeClass};
use featmatch_layout::{LayoutResult, Point};
use std::fmt::Write as _;
use unicode_width::UnicodeWidthStr;

pub const DEFAULT_NODE_COLOR: &str = "lightblue";
pub const DEFAULT_EDGE_COLOR: &str = "gray";

const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
const TITLE_FONT_SIZE: f64 = 16.0;
const TITLE_BAND: f64 = 48.0;

/// What text is drawn inside each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeLabelMode {
    /// The node's `type` attribute, falling back to its id.
    #[default]
    Type,
    /// The node id.
    Id,
}

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub node_radius: f64,
    pub font_size: f64,
    pub node_labels: NodeLabelMode,
    /// Draw `CX`/`CC` at each edge midpoint.
    pub edge_labels: bool,
    pub edge_font_size: f64,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        // 10x8 inch figure at 100 dpi.
        Self {
            title: String::new(),
            width: 1000.0,
            height: 800.0,
            margin: 60.0,
            node_radius: 24.0,
            font_size: 11.0,
            node_labels: NodeLabelMode::Type,
            edge_labels: true,
            edge_font_size: 10.0,
        }
    }
}

impl SvgRenderOptions {
    /// Type labels on nodes and `CX`/`CC` labels on edges.
    pub fn labels(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Node ids only, no edge labels.
    pub fn numbers(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            node_labels: NodeLabelMode::Id,
            edge_labels: false,
            ..Default::default()
        }
    }

    /// Smaller nodes and text with type labels, used for the match overlay.
    pub fn overlay(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            node_radius: 21.0,
            font_size: 8.5,
            edge_labels: false,
            ..Default::default()
        }
    }
}

/// Maps layout coordinates into the drawable area, y pointing up.
struct Viewport {
    min: Point,
    span_x: f64,
    span_y: f64,
    left: f64,
    top: f64,
    inner_w: f64,
    inner_h: f64,
}

impl Viewport {
    fn fit(points: &[Point], options: &SvgRenderOptions) -> Self {
        let mut min = Point {
            x: f64::INFINITY,
            y: f64::INFINITY,
        };
        let mut max = Point {
            x: f64::NEG_INFINITY,
            y: f64::NEG_INFINITY,
        };
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        if points.is_empty() {
            min = Point { x: 0.0, y: 0.0 };
            max = min;
        }
        let left = options.margin;
        let top = options.margin + TITLE_BAND;
        Self {
            min,
            span_x: max.x - min.x,
            span_y: max.y - min.y,
            left,
            top,
            inner_w: (options.width - 2.0 * options.margin).max(1.0),
            inner_h: (options.height - 2.0 * options.margin - TITLE_BAND).max(1.0),
        }
    }

    fn project(&self, p: Point) -> (f64, f64) {
        let fx = if self.span_x > 0.0 {
            (p.x - self.min.x) / self.span_x
        } else {
            0.5
        };
        let fy = if self.span_y > 0.0 {
            (p.y - self.min.y) / self.span_y
        } else {
            0.5
        };
        (
            self.left + fx * self.inner_w,
            self.top + (1.0 - fy) * self.inner_h,
        )
    }
}

fn text_width(text: &str, font_size: f64) -> f64 {
    text.width() as f64 * font_size * 0.6
}

/// Draws `graph` at the positions in `layout` with the colours in `colors`.
///
/// `colors` must have one entry per node and per edge, in graph order. Positions are looked up by
/// [`NodeId::key`](featmatch_core::NodeId::key).
pub fn render_graph_svg(
    graph: &AttributedGraph,
    layout: &LayoutResult,
    colors: &ColorOverlay,
    options: &SvgRenderOptions,
) -> Result<String> {
    if colors.nodes.len() != graph.node_count() {
        return Err(Error::OverlayMismatch {
            what: "nodes",
            expected: graph.node_count(),
            actual: colors.nodes.len(),
        });
    }
    if colors.edges.len() != graph.edge_count() {
        return Err(Error::OverlayMismatch {
            what: "edges",
            expected: graph.edge_count(),
            actual: colors.edges.len(),
        });
    }

    let mut points = Vec::with_capacity(graph.node_count());
    for id in graph.node_ids() {
        let p = layout.get(&id.key()).ok_or_else(|| Error::MissingPosition {
            node_id: id.to_string(),
        })?;
        points.push(p);
    }
    let viewport = Viewport::fit(&points, options);
    let projected: Vec<(f64, f64)> = points.iter().map(|&p| viewport.project(p)).collect();

    let w = fmt(options.width);
    let h = fmt(options.height);
    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{FONT_FAMILY}">"#
    );
    out.push_str(r#"<rect x="0" y="0" width="100%" height="100%" fill="white"/>"#);
    if !options.title.is_empty() {
        let _ = write!(
            &mut out,
            r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="{size}" fill="black">{text}</text>"#,
            x = fmt(options.width / 2.0),
            y = fmt(options.margin / 2.0 + TITLE_FONT_SIZE),
            size = fmt(TITLE_FONT_SIZE),
            text = escape_xml(&options.title)
        );
    }

    out.push_str(r#"<g class="edges">"#);
    for e in graph.edges() {
        let (Some(a), Some(b)) = (graph.node_position(e.source), graph.node_position(e.target))
        else {
            continue;
        };
        if a == b {
            continue;
        }
        let (x1, y1) = projected[a];
        let (x2, y2) = projected[b];
        let _ = write!(
            &mut out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1.5"/>"#,
            fmt(x1),
            fmt(y1),
            fmt(x2),
            fmt(y2),
            escape_xml(colors.edge(e.position))
        );
    }
    out.push_str("</g>");

    if options.edge_labels {
        out.push_str(r#"<g class="edge-labels">"#);
        for e in graph.edges() {
            let (Some(a), Some(b)) =
                (graph.node_position(e.source), graph.node_position(e.target))
            else {
                continue;
            };
            let label = EdgeClass::of(e.attrs).as_str();
            let (x1, y1) = projected[a];
            let (x2, y2) = projected[b];
            let (mx, my) = ((x1 + x2) / 2.0, (y1 + y2) / 2.0);
            let plate_w = text_width(label, options.edge_font_size) + 6.0;
            let plate_h = options.edge_font_size + 4.0;
            let _ = write!(
                &mut out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="white" fill-opacity="0.85"/>"#,
                fmt(mx - plate_w / 2.0),
                fmt(my - plate_h / 2.0),
                fmt(plate_w),
                fmt(plate_h)
            );
            let _ = write!(
                &mut out,
                r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-size="{}" fill="black">{}</text>"#,
                fmt(mx),
                fmt(my),
                fmt(options.edge_font_size),
                label
            );
        }
        out.push_str("</g>");
    }

    out.push_str(r#"<g class="nodes">"#);
    for (pos, node) in graph.nodes().enumerate() {
        let (cx, cy) = projected[pos];
        let label = match options.node_labels {
            NodeLabelMode::Type => graph.type_label(&node.id).into_owned(),
            NodeLabelMode::Id => node.id.to_string(),
        };
        let _ = write!(
            &mut out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="none"/>"#,
            fmt(cx),
            fmt(cy),
            fmt(options.node_radius),
            escape_xml(colors.node(pos))
        );
        let _ = write!(
            &mut out,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-size="{}" fill="black">{}</text>"#,
            fmt(cx),
            fmt(cy),
            fmt(options.font_size),
            escape_xml(&label)
        );
    }
    out.push_str("</g>");

    out.push_str("</svg>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_centres_a_single_point() {
        let options = SvgRenderOptions::default();
        let vp = Viewport::fit(&[Point { x: 3.0, y: -2.0 }], &options);
        let (x, y) = vp.project(Point { x: 3.0, y: -2.0 });
        assert!((x - options.width / 2.0).abs() < 1e-9, "x: {x}");
        let expected_y = options.margin + TITLE_BAND + vp.inner_h / 2.0;
        assert!((y - expected_y).abs() < 1e-9, "y: {y}");
    }

    #[test]
    fn viewport_flips_the_y_axis() {
        let options = SvgRenderOptions::default();
        let pts = [Point { x: -1.0, y: -1.0 }, Point { x: 1.0, y: 1.0 }];
        let vp = Viewport::fit(&pts, &options);
        let (_, low) = vp.project(pts[0]);
        let (_, high) = vp.project(pts[1]);
        assert!(high < low);
    }

    #[test]
    fn text_width_counts_wide_characters_twice() {
        assert_eq!(text_width("CX", 10.0), 12.0);
        assert_eq!(text_width("穴", 10.0), 12.0);
    }
}
