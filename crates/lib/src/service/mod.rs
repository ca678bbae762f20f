//! Deployment descriptor loading and saving.
//!
//! The descriptor is owned by the deployment orchestrator. The pipeline reads
//! it once into a [`ServiceConfig`], and writes it back after a single patch.

mod types;

pub use types::*;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur reading or writing a descriptor.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },

  #[error("failed to serialize descriptor: {0}")]
  Serialize(#[source] serde_yaml::Error),

  #[error("failed to write {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl ServiceConfig {
  /// Parse a descriptor from YAML text.
  pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
    // An empty document deserializes as unit, not as an empty map.
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str(content)
  }

  pub fn to_yaml(&self) -> Result<String, ServiceError> {
    serde_yaml::to_string(self).map_err(ServiceError::Serialize)
  }

  /// Load a descriptor from disk.
  pub fn load(path: &Path) -> Result<Self, ServiceError> {
    let content = fs::read_to_string(path).map_err(|source| ServiceError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    let config = Self::from_yaml(&content).map_err(|source| ServiceError::Parse {
      path: path.to_path_buf(),
      source,
    })?;

    debug!(path = %path.display(), functions = config.functions.len(), "loaded descriptor");
    Ok(config)
  }

  /// Write the descriptor to disk.
  ///
  /// Writes to a sibling temp file first, then renames over the target.
  pub fn save(&self, path: &Path) -> Result<(), ServiceError> {
    let content = self.to_yaml()?;

    let mut temp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    temp_name.push(".tmp");
    let temp_path = path.with_file_name(temp_name);

    let write_err = |source| ServiceError::Write {
      path: path.to_path_buf(),
      source,
    };
    fs::write(&temp_path, &content).map_err(write_err)?;
    fs::rename(&temp_path, path).map_err(write_err)?;

    debug!(path = %path.display(), "saved descriptor");
    Ok(())
  }
}
