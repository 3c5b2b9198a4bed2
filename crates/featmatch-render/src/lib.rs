#![forbid(unsafe_code)]

//! Headless rendering for `featmatch`: static SVG drawings of laid-out graphs, standalone
//! interactive graph pages and the HTML summary report.

pub mod interactive;
pub mod report;
pub mod svg;
mod util;

pub use interactive::{InteractiveOptions, render_interactive_html};
pub use report::{
    MatchSection, NO_MATCHES_TEXT, ReportDocument, ReportImage, ReportLink, ReportSection,
    render_report_html,
};
pub use svg::{NodeLabelMode, SvgRenderOptions, render_graph_svg};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout has no position for node {node_id}")]
    MissingPosition { node_id: String },
    #[error("colour overlay does not fit the graph ({what}: expected {expected}, got {actual})")]
    OverlayMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("graph data JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
