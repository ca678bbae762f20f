//! Cleanup of packaged artifacts.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{PipelineError, Result};
use crate::record::BuiltUnit;

/// Delete the binary and archive of every unit in `units`.
///
/// Paths come from the build record, so each unit is cleaned with its own
/// profile directory. Functions sharing a handler binary and profile share
/// files: each path is removed once, and paths still referenced by a unit in
/// `retained` are left alone. The first failed deletion aborts.
pub fn clean_units(units: &[BuiltUnit], retained: &[BuiltUnit]) -> Result<usize> {
  let kept: HashSet<&Path> = retained.iter().flat_map(paths).collect();
  let mut seen: HashSet<&Path> = HashSet::new();

  let mut removed = 0;
  for unit in units {
    info!(function = %unit.name, profile = %unit.profile, "deleting package files");
    for path in paths(unit) {
      if kept.contains(path) {
        debug!(path = %path.display(), "still used by another function, kept");
        continue;
      }
      if !seen.insert(path) {
        continue;
      }
      remove(path)?;
      removed += 1;
    }
  }
  Ok(removed)
}

fn paths(unit: &BuiltUnit) -> [&Path; 2] {
  [unit.binary_path.as_path(), unit.archive_path.as_path()]
}

fn remove(path: &Path) -> Result<()> {
  fs::remove_file(path).map_err(|source| PipelineError::Cleanup {
    path: path.to_path_buf(),
    source,
  })
}
