//! Build record storage.
//!
//! The build step writes the list of units it actually built, with their
//! resolved profile and output paths, so cleanup removes exactly those files
//! without re-running selection.
//!
//! # Storage Layout
//!
//! ```text
//! {target_dir}/x86_64-unknown-linux-musl/
//! ├── .sls-rust-build.json   # BuildRecord
//! ├── debug/<binary>[.zip]
//! └── release/<binary>[.zip]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{BUILD_RECORD_FILENAME, TARGET_TRIPLE};
use crate::unit::Profile;

/// Current version of the record format.
pub const BUILD_RECORD_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RecordError {
  #[error("failed to create record directory: {0}")]
  CreateDir(#[source] io::Error),

  #[error("failed to read build record: {0}")]
  Read(#[source] io::Error),

  #[error("failed to write build record: {0}")]
  Write(#[source] io::Error),

  #[error("failed to parse build record: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("failed to serialize build record: {0}")]
  Serialize(#[source] serde_json::Error),

  #[error("unsupported build record version {0}")]
  UnsupportedVersion(u32),
}

/// A unit that was compiled and packaged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltUnit {
  /// Function name in the descriptor.
  pub name: String,
  pub binary: String,
  pub profile: Profile,
  pub binary_path: PathBuf,
  pub archive_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRecord {
  pub version: u32,
  pub units: Vec<BuiltUnit>,
}

impl BuildRecord {
  pub fn new(units: Vec<BuiltUnit>) -> Self {
    Self {
      version: BUILD_RECORD_VERSION,
      units,
    }
  }
}

/// Reads and writes the build record under a target directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
  path: PathBuf,
}

impl RecordStore {
  pub fn new(target_dir: &Path) -> Self {
    Self {
      path: target_dir.join(TARGET_TRIPLE).join(BUILD_RECORD_FILENAME),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Load the record. Returns `Ok(None)` when no build has been recorded.
  pub fn load(&self) -> Result<Option<BuildRecord>, RecordError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(RecordError::Read(e)),
    };

    let record: BuildRecord = serde_json::from_str(&content).map_err(RecordError::Parse)?;

    if record.version != BUILD_RECORD_VERSION {
      return Err(RecordError::UnsupportedVersion(record.version));
    }

    Ok(Some(record))
  }

  /// Save the record, replacing any previous one.
  pub fn save(&self, record: &BuildRecord) -> Result<(), RecordError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent).map_err(RecordError::CreateDir)?;
    }

    let temp_path = self.path.with_extension("json.tmp");
    let content = serde_json::to_string_pretty(record).map_err(RecordError::Serialize)?;
    fs::write(&temp_path, &content).map_err(RecordError::Write)?;
    fs::rename(&temp_path, &self.path).map_err(RecordError::Write)?;

    debug!(path = %self.path.display(), units = record.units.len(), "saved build record");
    Ok(())
  }

  /// Remove the record. Removing a missing record succeeds.
  pub fn remove(&self) -> Result<(), RecordError> {
    match fs::remove_file(&self.path) {
      Ok(()) => Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
      Err(e) => Err(RecordError::Write(e)),
    }
  }
}
