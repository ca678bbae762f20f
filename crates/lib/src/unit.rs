//! Build units and selection.
//!
//! A build unit is one declared function that compiles to one native
//! executable. Units are an immutable snapshot of the descriptor taken when
//! the pipeline starts.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::{RUST_RUNTIME, TARGET_TRIPLE};
use crate::error::{PipelineError, Result};
use crate::service::{FunctionDef, ServiceConfig};

/// Cargo build profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
  Dev,
  #[default]
  Release,
}

impl Profile {
  /// Resolve a declared profile name. Only `dev` selects a debug build.
  pub fn resolve(name: Option<&str>) -> Self {
    match name {
      Some("dev") => Profile::Dev,
      _ => Profile::Release,
    }
  }

  /// Directory cargo writes this profile's artifacts to.
  pub fn dir_name(self) -> &'static str {
    match self {
      Profile::Dev => "debug",
      Profile::Release => "release",
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Profile::Dev => "dev",
      Profile::Release => "release",
    }
  }
}

impl fmt::Display for Profile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A parsed `package[.binary]` handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
  pub package: String,
  pub binary: String,
}

impl Handler {
  /// Split on `.`: the first segment is the package, the second the binary.
  /// Further segments are ignored; a missing or empty binary defaults to the
  /// package name.
  pub fn parse(handler: &str) -> Self {
    let mut parts = handler.split('.');
    let package = parts.next().unwrap_or(handler).to_string();
    let binary = match parts.next() {
      Some(binary) if !binary.is_empty() => binary.to_string(),
      _ => package.clone(),
    };
    Self { package, binary }
  }
}

/// One function selected for a native build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildUnit {
  pub name: String,
  pub package: String,
  pub binary: String,
  pub profile: Profile,
  /// True when the function declares `runtime` itself rather than inheriting
  /// the provider default.
  pub runtime_is_own: bool,
}

impl BuildUnit {
  /// `<target-dir>/<triple>/<debug|release>`
  pub fn output_dir(&self, target_dir: &Path) -> PathBuf {
    target_dir.join(TARGET_TRIPLE).join(self.profile.dir_name())
  }

  pub fn binary_path(&self, target_dir: &Path) -> PathBuf {
    self.output_dir(target_dir).join(&self.binary)
  }

  pub fn archive_path(&self, target_dir: &Path) -> PathBuf {
    self.output_dir(target_dir).join(format!("{}.zip", self.binary))
  }
}

/// Runtime a function runs with: its own, else the provider default.
pub fn effective_runtime<'a>(config: &'a ServiceConfig, func: &'a FunctionDef) -> Option<&'a str> {
  func.runtime.as_deref().or(config.provider.runtime.as_deref())
}

/// Select the functions that need a native build.
///
/// With `only` set, just that function is considered. Fails when nothing
/// matches, since asking for native builds and finding none means the
/// descriptor is misconfigured.
pub fn select_units(config: &ServiceConfig, only: Option<&str>) -> Result<Vec<BuildUnit>> {
  let candidates: Vec<(&String, &FunctionDef)> = match only {
    Some(name) => {
      let (key, func) = config
        .functions
        .get_key_value(name)
        .ok_or_else(|| PipelineError::UnknownFunction(name.to_string()))?;
      vec![(key, func)]
    }
    None => config.functions.iter().collect(),
  };

  let mut units = Vec::new();
  for (name, func) in candidates {
    if effective_runtime(config, func) != Some(RUST_RUNTIME) {
      debug!(function = %name, "skipping non-rust function");
      continue;
    }

    let handler = func
      .handler
      .as_deref()
      .ok_or_else(|| PipelineError::MissingHandler(name.clone()))?;
    let Handler { package, binary } = Handler::parse(handler);

    units.push(BuildUnit {
      name: name.clone(),
      package,
      binary,
      profile: Profile::resolve(func.profile().or(config.default_profile())),
      runtime_is_own: func.runtime.as_deref() == Some(RUST_RUNTIME),
    });
  }

  if units.is_empty() {
    return Err(PipelineError::NoRustFunctions);
  }

  Ok(units)
}
