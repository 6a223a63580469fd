//! Error types for `poet-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown chart: {0:?}")]
  UnknownChart(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
