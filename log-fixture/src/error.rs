use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("cannot create {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("write failed: {0}")]
    Write(#[from] io::Error),

    #[error("cannot serialize log record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cannot stat {}: {source}", path.display())]
    Metadata { path: PathBuf, source: io::Error },
}
