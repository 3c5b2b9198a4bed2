#![forbid(unsafe_code)]

//! Headless force-directed layout for small attributed graphs.
//!
//! The embedder is a Fruchterman-Reingold spring model with a seeded initial placement, so the
//! same graph and seed always produce the same coordinates. Results are centred on the origin
//! and scaled so the largest coordinate magnitude equals `SpringOptions::scale`.

pub mod algo;
pub mod error;
pub mod graph;

pub use algo::{Algorithm, SpringOptions};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node, Point};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: Algorithm) -> Result<LayoutResult> {
    match algorithm {
        Algorithm::Spring(opts) => algo::spring::layout(graph, &opts),
    }
}
