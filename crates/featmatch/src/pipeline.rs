//! End-to-end run: load, draw, match, highlight, tabulate, report.

use crate::raster::{RasterOptions, svg_to_png};
use crate::{Error, Result};
use featmatch_core::{
    AttributedGraph, ColorOverlay, Highlight, MatchSummary, MatchTable, find_subgraph_matches,
    highlight_matches, load_graph,
};
use featmatch_layout::{Algorithm, Edge, Graph, LayoutResult, Node, SpringOptions};
use featmatch_render::{
    InteractiveOptions, MatchSection, ReportDocument, ReportImage, ReportLink, ReportSection,
    SvgRenderOptions, render_graph_svg, render_interactive_html, render_report_html,
    svg::{DEFAULT_EDGE_COLOR, DEFAULT_NODE_COLOR},
};
use std::path::{Path, PathBuf};

pub const DEFAULT_SEED: u64 = 60;

const GRAPHS_DIR: &str = "Graphs";
const HTML_DIR: &str = "HTML";
const TABLES_DIR: &str = "Tables";

const WORKPIECE_STEM: &str = "workpiece_graph";
const FEATURE_STEM: &str = "feature_graph";
const OVERLAY_IMAGE: &str = "workpiece_colored_subgraphs.png";
const NO_MATCH_IMAGE: &str = "workpiece_no_match.png";
const TABLE_FILE: &str = "subgraph_results.csv";
const REPORT_FILE: &str = "results_summary.html";

pub const OVERLAY_TITLE: &str = "Workpiece Graph with highlighted subgraphs";
pub const NO_MATCH_TITLE: &str = "Workpiece Graph (no match found)";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub workpiece_path: PathBuf,
    pub feature_path: PathBuf,
    /// Root of every artifact the run writes.
    pub out_dir: PathBuf,
    pub seed: u64,
    /// Pixel multiplier for the PNG drawings.
    pub raster_scale: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workpiece_path: PathBuf::from("workpiece_graph.json"),
            feature_path: PathBuf::from("feature_graph.json"),
            out_dir: PathBuf::from("Results"),
            seed: DEFAULT_SEED,
            raster_scale: 1.0,
        }
    }
}

/// Artifact paths below an output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn graphs_dir(&self) -> PathBuf {
        self.root.join(GRAPHS_DIR)
    }

    pub fn html_dir(&self) -> PathBuf {
        self.root.join(HTML_DIR)
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.root.join(TABLES_DIR)
    }

    /// `Graphs/<stem>_labels.png`
    pub fn labels_image(&self, stem: &str) -> PathBuf {
        self.graphs_dir().join(labels_file(stem))
    }

    /// `Graphs/<stem>_numbers.png`
    pub fn numbers_image(&self, stem: &str) -> PathBuf {
        self.graphs_dir().join(numbers_file(stem))
    }

    pub fn interactive_page(&self, stem: &str) -> PathBuf {
        self.html_dir().join(format!("{stem}.html"))
    }

    pub fn overlay_image(&self) -> PathBuf {
        self.graphs_dir().join(OVERLAY_IMAGE)
    }

    pub fn no_match_image(&self) -> PathBuf {
        self.graphs_dir().join(NO_MATCH_IMAGE)
    }

    pub fn table(&self) -> PathBuf {
        self.tables_dir().join(TABLE_FILE)
    }

    pub fn report(&self) -> PathBuf {
        self.html_dir().join(REPORT_FILE)
    }

    /// Creates the `Graphs`, `HTML` and `Tables` directories. Existing directories are fine.
    pub fn create_dirs(&self) -> Result<()> {
        for dir in [self.graphs_dir(), self.html_dir(), self.tables_dir()] {
            std::fs::create_dir_all(&dir).map_err(|source| Error::Io { path: dir, source })?;
        }
        Ok(())
    }
}

fn labels_file(stem: &str) -> String {
    format!("{stem}_labels.png")
}

fn numbers_file(stem: &str) -> String {
    format!("{stem}_numbers.png")
}

/// Image path as seen from a page in the `HTML` directory.
fn from_html_dir(file: &str) -> String {
    format!("../{GRAPHS_DIR}/{file}")
}

#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub match_count: usize,
    pub report_path: PathBuf,
    /// The highlighted drawing, or the no-match drawing when nothing was found.
    pub overlay_image: PathBuf,
    /// Only written when at least one match exists.
    pub table_path: Option<PathBuf>,
}

struct PipelineContext {
    outputs: OutputLayout,
    raster: RasterOptions,
    seed: u64,
}

impl PipelineContext {
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
        std::fs::write(path, contents).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "wrote file");
        Ok(())
    }

    /// Deletes `path` if it exists.
    fn remove_stale(&self, path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed stale result");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn write_png(&self, path: &Path, svg: &str) -> Result<()> {
        let png = svg_to_png(svg, &self.raster)?;
        self.write(path, png)
    }

    fn draw(
        &self,
        graph: &AttributedGraph,
        layout: &LayoutResult,
        colors: &ColorOverlay,
        options: &SvgRenderOptions,
        path: &Path,
    ) -> Result<()> {
        let svg = render_graph_svg(graph, layout, colors, options)?;
        self.write_png(path, &svg)
    }

    /// Labels and numbers drawings plus the interactive page for one input graph.
    fn write_views(
        &self,
        graph: &AttributedGraph,
        layout: &LayoutResult,
        stem: &str,
        display_name: &str,
    ) -> Result<()> {
        let colors = ColorOverlay::uniform(graph, DEFAULT_NODE_COLOR, DEFAULT_EDGE_COLOR);
        self.draw(
            graph,
            layout,
            &colors,
            &SvgRenderOptions::labels(format!("{display_name} (Labels)")),
            &self.outputs.labels_image(stem),
        )?;
        self.draw(
            graph,
            layout,
            &colors,
            &SvgRenderOptions::numbers(format!("{display_name} (Numbers)")),
            &self.outputs.numbers_image(stem),
        )?;

        let html = render_interactive_html(graph, &InteractiveOptions::new(display_name))?;
        self.write(&self.outputs.interactive_page(stem), html)
    }

    /// Draws the overlay and, when there are matches, writes the CSV table.
    ///
    /// Results of an earlier run in the same directory are removed first, so the table and the
    /// overlay image always describe this run.
    fn write_highlight(
        &self,
        workpiece: &AttributedGraph,
        layout: &LayoutResult,
        highlight: &Highlight,
    ) -> Result<(PathBuf, Option<PathBuf>)> {
        for stale in [
            self.outputs.table(),
            self.outputs.overlay_image(),
            self.outputs.no_match_image(),
        ] {
            self.remove_stale(&stale)?;
        }

        if !highlight.has_matches() {
            let path = self.outputs.no_match_image();
            self.draw(
                workpiece,
                layout,
                &highlight.overlay,
                &SvgRenderOptions::overlay(NO_MATCH_TITLE),
                &path,
            )?;
            return Ok((path, None));
        }

        let image = self.outputs.overlay_image();
        self.draw(
            workpiece,
            layout,
            &highlight.overlay,
            &SvgRenderOptions::overlay(OVERLAY_TITLE),
            &image,
        )?;

        let table = MatchTable::from_rows(&highlight.rows);
        for row in &table.rows {
            tracing::info!("{}", row.join(" | "));
        }
        let table_path = self.outputs.table();
        table.write_csv(&table_path)?;
        Ok((image, Some(table_path)))
    }

    fn write_report(&self, overlay_image: &Path, table_path: Option<&Path>) -> Result<PathBuf> {
        let table = table_path.map(MatchTable::read_csv).transpose()?;
        let matches = match &table {
            Some(table) => MatchSection::Table(table),
            None => MatchSection::NoMatches,
        };

        let overlay_file = overlay_image
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| OVERLAY_IMAGE.to_string());

        let doc = ReportDocument {
            title: "Graph Results".to_string(),
            heading: "Graph Results".to_string(),
            sections: vec![
                graph_section("Workpiece Graph", WORKPIECE_STEM),
                graph_section("Feature Graph", FEATURE_STEM),
            ],
            links_heading: "Interactive Graphs".to_string(),
            links: vec![
                ReportLink::new(
                    format!("{WORKPIECE_STEM}.html"),
                    "Workpiece Graph (interactive)",
                ),
                ReportLink::new(format!("{FEATURE_STEM}.html"), "Feature Graph (interactive)"),
            ],
            matches_heading: "Matched Subgraphs".to_string(),
            matches,
            overlay: Some(ReportImage::new(from_html_dir(&overlay_file), "Matched subgraphs")),
        };

        let path = self.outputs.report();
        self.write(&path, render_report_html(&doc))?;
        Ok(path)
    }
}

fn graph_section(heading: &str, stem: &str) -> ReportSection {
    ReportSection {
        heading: heading.to_string(),
        images: vec![
            ReportImage::new(from_html_dir(&labels_file(stem)), format!("{heading} (Labels)")),
            ReportImage::new(
                from_html_dir(&numbers_file(stem)),
                format!("{heading} (Numbers)"),
            ),
        ],
    }
}

/// Input for the layout engine: node ids and edge endpoints only.
///
/// Nodes are keyed by [`NodeId::key`](featmatch_core::NodeId::key) so `3` and `"3"` get separate
/// positions.
pub fn layout_input(graph: &AttributedGraph) -> Graph {
    Graph {
        nodes: graph.node_ids().map(|id| Node::new(id.key())).collect(),
        edges: graph
            .edges()
            .map(|e| Edge::new(e.source.key(), e.target.key()))
            .collect(),
    }
}

pub fn compute_layout(graph: &AttributedGraph, seed: u64) -> Result<LayoutResult> {
    let result = featmatch_layout::layout(
        &layout_input(graph),
        Algorithm::Spring(SpringOptions::with_seed(seed)),
    )?;
    Ok(result)
}

/// Positions for the feature graph.
///
/// Reuses `workpiece_layout` when it has a position for every feature node, so both drawings
/// share coordinates; otherwise lays the feature graph out on its own with the same seed.
pub fn feature_layout(
    feature: &AttributedGraph,
    workpiece_layout: &LayoutResult,
    seed: u64,
) -> Result<LayoutResult> {
    if workpiece_layout.covers(feature.node_ids().map(|id| id.key())) {
        tracing::debug!("feature graph reuses the workpiece layout");
        return Ok(workpiece_layout.clone());
    }
    compute_layout(feature, seed)
}

/// Runs every stage and returns where the results went.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    let workpiece = load_graph(&config.workpiece_path)?;
    let feature = load_graph(&config.feature_path)?;

    let ctx = PipelineContext {
        outputs: OutputLayout::new(&config.out_dir),
        raster: RasterOptions::with_scale(config.raster_scale),
        seed: config.seed,
    };
    ctx.outputs.create_dirs()?;

    let workpiece_layout = compute_layout(&workpiece, ctx.seed)?;
    let feature_layout = feature_layout(&feature, &workpiece_layout, ctx.seed)?;
    tracing::info!(seed = ctx.seed, "computed layouts");

    ctx.write_views(&workpiece, &workpiece_layout, WORKPIECE_STEM, "Workpiece Graph")?;
    ctx.write_views(&feature, &feature_layout, FEATURE_STEM, "Feature Graph")?;
    tracing::info!(dir = %ctx.outputs.root().display(), "wrote graph views");

    let matches = find_subgraph_matches(&workpiece, &feature);
    let summary = MatchSummary::of(&matches);
    let highlight = highlight_matches(&workpiece, &feature, &matches);
    let (overlay_image, table_path) =
        ctx.write_highlight(&workpiece, &workpiece_layout, &highlight)?;

    let report_path = ctx.write_report(&overlay_image, table_path.as_deref())?;
    tracing::info!(path = %report_path.display(), "wrote results summary");

    Ok(PipelineOutcome {
        match_count: summary.count,
        report_path,
        overlay_image,
        table_path,
    })
}
