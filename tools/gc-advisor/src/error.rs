//! Structured error types for the advisor.
//!
//! Parsing and rule evaluation never fail; only the CLI boundary and
//! report (de)serialization surface errors.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
  #[error("log file not found: {}", path.display())]
  LogNotFound { path: PathBuf },

  #[error("io: {}: {source}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl AdvisorError {
  pub fn log_not_found(path: &Path) -> Self {
    Self::LogNotFound {
      path: path.to_path_buf(),
    }
  }

  pub fn io(path: &Path, source: std::io::Error) -> Self {
    Self::Io {
      path: path.to_path_buf(),
      source,
    }
  }
}
