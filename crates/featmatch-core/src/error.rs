use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected graph document shape in {}: {message}", path.display())]
    Shape { path: PathBuf, message: String },

    #[error("unsupported node identifier: {value} (expected a string or a number)")]
    InvalidNodeId { value: String },

    #[error("match table error ({}): {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}
