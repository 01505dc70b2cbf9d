use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Could not find knowledgeC.db at {}.", .0.display())]
    NotFound(PathBuf),
    #[error(
        "The knowledgeC.db at {} is not readable.\nPlease grant full disk access to the \
         application running this tool (e.g. Terminal, iTerm, VSCode etc.).",
        .0.display()
    )]
    Unreadable(PathBuf),
    #[error("query against {} failed: {source}", path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{field} timestamp {value} is outside the representable range")]
    InvalidTimestamp { field: &'static str, value: f64 },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object s3://{bucket}/{key} does not exist")]
    NotFound { bucket: String, key: String },
    #[error("object store request failed: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("notification carries no object records")]
    EmptyEvent,
    #[error("malformed notification: {0}")]
    Event(#[source] serde_json::Error),
    #[error("object body is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to encode transformed document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}
