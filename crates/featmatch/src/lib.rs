#![forbid(unsafe_code)]

//! `featmatch` finds every occurrence of a manufacturing feature graph inside a workpiece graph.
//!
//! Both graphs are read from JSON node-link documents. The run draws each graph (static PNG and
//! an interactive HTML page), enumerates the attribute-matched subgraph embeddings, colours them
//! onto the workpiece drawing, writes a CSV table and assembles an HTML summary report.
//!
//! The building blocks live in their own crates and are re-exported here:
//! - [`core`]: graph model, loader, matcher, highlighting, CSV table
//! - [`layout`]: seeded spring layout
//! - [`render`]: SVG, interactive HTML and report rendering

pub use featmatch_core as core;
pub use featmatch_layout as layout;
pub use featmatch_render as render;

pub mod pipeline;
pub mod raster;

pub use pipeline::{OutputLayout, PipelineConfig, PipelineOutcome, run};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] featmatch_core::Error),
    #[error(transparent)]
    Layout(#[from] featmatch_layout::Error),
    #[error(transparent)]
    Render(#[from] featmatch_render::Error),
    #[error(transparent)]
    Raster(#[from] raster::RasterError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
