//! Pipeline error type.
//!
//! Every failure aborts the whole run. There is no partial success and no
//! aggregation of errors across units.

use std::path::PathBuf;

use thiserror::Error;

use crate::cargo::ToolchainError;
use crate::package::PackageError;
use crate::record::RecordError;
use crate::service::ServiceError;

#[derive(Debug, Error)]
pub enum PipelineError {
  /// No declared function resolves to the native runtime.
  #[error("no Rust functions found. Use 'runtime: rust' in global or function configuration to use this plugin.")]
  NoRustFunctions,

  /// `--function` named a function the descriptor does not declare.
  #[error("function '{0}' is not declared in the service")]
  UnknownFunction(String),

  #[error("function '{0}' has no handler")]
  MissingHandler(String),

  #[error("rust build of '{unit}' failed: {source}")]
  Toolchain {
    unit: String,
    #[source]
    source: ToolchainError,
  },

  #[error("packaging '{unit}' failed: {source}")]
  Package {
    unit: String,
    #[source]
    source: PackageError,
  },

  #[error("cannot delete {path}: {source}")]
  Cleanup {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("no build record at {0}; nothing to clean")]
  NoBuildRecord(PathBuf),

  #[error(transparent)]
  Record(#[from] RecordError),

  #[error(transparent)]
  Service(#[from] ServiceError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
