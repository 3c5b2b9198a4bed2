#![forbid(unsafe_code)]

//! Attributed graph model and subgraph search for `featmatch`.
//!
//! A *workpiece* graph describes the face-adjacency structure of a part; a *feature* graph is a
//! small pattern (pocket, slot, step, ...) to be located inside it. Both are loaded from JSON,
//! searched with [`find_subgraph_matches`] and summarised with [`highlight_matches`].

pub mod attrs;
pub mod error;
pub mod graph;
pub mod highlight;
pub mod load;
pub mod matcher;
pub mod table;

pub use attrs::{ANGULAR_TYPE_KEY, AttrBag, EdgeClass, NODE_TYPE_KEY, NodeId};
pub use error::{Error, Result};
pub use graph::{AttributedGraph, EdgeData, EdgeView, NodeData};
pub use highlight::{
    BASE_EDGE_COLOR, BASE_NODE_COLOR, ColorOverlay, Highlight, MatchRow, PALETTE,
    highlight_matches, palette_color,
};
pub use load::{graph_from_value, load_graph, parse_graph};
pub use matcher::{Match, MatchSummary, find_subgraph_matches};
pub use table::MatchTable;
