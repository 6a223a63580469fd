//! Error type for `poet-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("malformed corpus file {path:?}: {source}")]
  CorpusFile {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("corpus directory {0:?} has no authors file")]
  MissingAuthors(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
