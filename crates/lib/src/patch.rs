//! Descriptor patching.
//!
//! All descriptor mutations are collected into a [`ServicePatch`] while the
//! pipeline runs against its snapshot, then applied in one step. Downstream
//! deployment tooling only understands the generic `provided` runtime, so the
//! native tag is rewritten wherever it appears.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::consts::{BASE_RUNTIME, RUST_RUNTIME};
use crate::service::ServiceConfig;
use crate::unit::BuildUnit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionPatch {
  pub name: String,
  /// New `package.artifact`.
  pub artifact: String,
  /// New `runtime`, when the function declared the native tag itself.
  pub runtime: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServicePatch {
  pub functions: Vec<FunctionPatch>,
  /// New `provider.runtime`.
  pub provider_runtime: Option<String>,
}

impl ServicePatch {
  pub fn new() -> Self {
    Self::default()
  }

  /// Point a built unit at its archive.
  pub fn set_artifact(&mut self, unit: &BuildUnit, artifact: String) {
    self.functions.push(FunctionPatch {
      name: unit.name.clone(),
      artifact,
      runtime: unit.runtime_is_own.then(|| BASE_RUNTIME.to_string()),
    });
  }

  /// Rewrite the provider default if it is the native tag.
  pub fn normalize_provider(&mut self, config: &ServiceConfig) {
    if config.provider.runtime.as_deref() == Some(RUST_RUNTIME) {
      self.provider_runtime = Some(BASE_RUNTIME.to_string());
    }
  }

  pub fn apply(&self, config: &mut ServiceConfig) {
    for patch in &self.functions {
      let Some(func) = config.functions.get_mut(&patch.name) else {
        warn!(function = %patch.name, "function disappeared from descriptor, not patched");
        continue;
      };

      func.package.get_or_insert_default().artifact = Some(patch.artifact.clone());
      if let Some(runtime) = &patch.runtime {
        func.runtime = Some(runtime.clone());
      }
      debug!(function = %patch.name, artifact = %patch.artifact, "patched function");
    }

    if let Some(runtime) = &self.provider_runtime {
      config.provider.runtime = Some(runtime.clone());
      debug!(runtime = %runtime, "patched provider runtime");
    }
  }
}

/// Artifact path as written to the descriptor: relative to the service
/// directory when the archive lives under it.
pub fn artifact_path(service_dir: &Path, archive: &Path) -> String {
  archive
    .strip_prefix(service_dir)
    .unwrap_or(archive)
    .to_string_lossy()
    .into_owned()
}
