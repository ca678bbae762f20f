//! Pipeline configuration.
//!
//! Paths are derived from the descriptor location, with environment
//! overrides for the cargo program and the target directory.

use std::env;
use std::path::{Path, PathBuf};

use crate::consts::{CARGO_ENV, DEFAULT_TARGET_DIR, TARGET_DIR_ENV};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
  /// Directory cargo runs in; artifact paths are written relative to it.
  pub service_dir: PathBuf,
  /// Cargo target directory.
  pub target_dir: PathBuf,
  /// Cargo program to run.
  pub cargo: PathBuf,
  /// Restrict the run to a single function.
  pub function: Option<String>,
}

impl PipelineConfig {
  /// Build a configuration for the descriptor at `descriptor`.
  ///
  /// - `SLS_RUST_CARGO` overrides the cargo program (default `cargo`)
  /// - `CARGO_TARGET_DIR` overrides the target directory (default
  ///   `<service-dir>/target`); relative values resolve against the service
  ///   directory
  pub fn for_descriptor(descriptor: &Path) -> Self {
    let parent = descriptor
      .parent()
      .filter(|p| !p.as_os_str().is_empty())
      .unwrap_or(Path::new("."));
    let service_dir = dunce::canonicalize(parent).unwrap_or_else(|_| parent.to_path_buf());

    let target_dir = match env::var_os(TARGET_DIR_ENV) {
      Some(dir) if !dir.is_empty() => service_dir.join(dir),
      _ => service_dir.join(DEFAULT_TARGET_DIR),
    };

    let cargo = match env::var_os(CARGO_ENV) {
      Some(program) if !program.is_empty() => PathBuf::from(program),
      _ => PathBuf::from("cargo"),
    };

    Self {
      service_dir,
      target_dir,
      cargo,
      function: None,
    }
  }

  pub fn with_function(mut self, function: Option<String>) -> Self {
    self.function = function;
    self
  }
}
