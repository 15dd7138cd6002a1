use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: invalid SRL record: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("line {line}: invalid CoNLL-U row: {message}")]
    Conllu { line: usize, message: String },
    #[error("line {line}: invalid alignment: {message}")]
    Alignment { line: usize, message: String },
    #[error("invalid dataset layout {}: {source}", path.display())]
    Layout {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
