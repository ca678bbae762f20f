//! The build-and-package pipeline.
//!
//! `build` runs selection, then compile → package → record for each unit in
//! turn, and finally applies a single descriptor patch. `clean` consumes the
//! build record written by `build`. The first error aborts either run.

use serde::Serialize;
use tracing::info;

use crate::cargo::Compiler;
use crate::clean::clean_units;
use crate::config::PipelineConfig;
use crate::consts::SUPPORTED_PROVIDER;
use crate::error::{PipelineError, Result};
use crate::package::package_binary;
use crate::patch::{ServicePatch, artifact_path};
use crate::record::{BuildRecord, BuiltUnit, RecordStore};
use crate::service::ServiceConfig;
use crate::unit::select_units;

/// Whether a run did anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome<T> {
  Completed(T),
  /// The provider has no custom runtime to package for.
  Skipped { provider: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
  pub units: Vec<BuiltUnit>,
  pub patch: ServicePatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanReport {
  pub units: Vec<BuiltUnit>,
  pub files_removed: usize,
}

fn skip_unsupported<T>(config: &ServiceConfig) -> Option<Outcome<T>> {
  if config.provider_name() == Some(SUPPORTED_PROVIDER) {
    return None;
  }
  info!(provider = ?config.provider_name(), "provider is not {}, skipping", SUPPORTED_PROVIDER);
  Some(Outcome::Skipped {
    provider: config.provider_name().map(str::to_string),
  })
}

/// Build, package and patch every selected unit.
///
/// `config` is only modified once every unit has been built and packaged.
pub fn build(
  config: &mut ServiceConfig,
  options: &PipelineConfig,
  compiler: &dyn Compiler,
) -> Result<Outcome<BuildReport>> {
  if let Some(skipped) = skip_unsupported(config) {
    return Ok(skipped);
  }

  let units = select_units(config, options.function.as_deref())?;

  let mut patch = ServicePatch::new();
  let mut built = Vec::with_capacity(units.len());

  for unit in &units {
    let handler = format!("{}.{}", unit.package, unit.binary);
    info!(function = %unit.name, "building native Rust {} func...", handler);

    compiler.build(unit).map_err(|source| PipelineError::Toolchain {
      unit: unit.name.clone(),
      source,
    })?;

    let archive = package_binary(&unit.output_dir(&options.target_dir), &unit.binary).map_err(|source| {
      PipelineError::Package {
        unit: unit.name.clone(),
        source,
      }
    })?;

    patch.set_artifact(unit, artifact_path(&options.service_dir, &archive));
    built.push(BuiltUnit {
      name: unit.name.clone(),
      binary: unit.binary.clone(),
      profile: unit.profile,
      binary_path: unit.binary_path(&options.target_dir),
      archive_path: archive,
    });
  }

  patch.normalize_provider(config);

  // A partial build keeps the earlier entries of functions it did not rebuild.
  let store = RecordStore::new(&options.target_dir);
  let mut recorded = match store.load()? {
    Some(previous) => previous
      .units
      .into_iter()
      .filter(|old| !built.iter().any(|new| new.name == old.name))
      .collect(),
    None => Vec::new(),
  };
  recorded.extend(built.iter().cloned());
  store.save(&BuildRecord::new(recorded))?;
  patch.apply(config);

  info!(units = built.len(), "packaged rust functions");
  Ok(Outcome::Completed(BuildReport { units: built, patch }))
}

/// Delete the files recorded by the last `build`.
///
/// With `options.function` set only that function's files are removed and
/// the rest of the record is kept.
pub fn clean(config: &ServiceConfig, options: &PipelineConfig) -> Result<Outcome<CleanReport>> {
  if let Some(skipped) = skip_unsupported(config) {
    return Ok(skipped);
  }

  let store = RecordStore::new(&options.target_dir);
  let record = store
    .load()?
    .ok_or_else(|| PipelineError::NoBuildRecord(store.path().to_path_buf()))?;

  let (selected, remaining): (Vec<BuiltUnit>, Vec<BuiltUnit>) = match options.function.as_deref() {
    Some(name) => record.units.into_iter().partition(|u| u.name == name),
    None => (record.units, Vec::new()),
  };

  if selected.is_empty() {
    if let Some(name) = options.function.as_deref() {
      return Err(PipelineError::UnknownFunction(name.to_string()));
    }
  }

  let files_removed = clean_units(&selected, &remaining)?;

  if remaining.is_empty() {
    store.remove()?;
  } else {
    store.save(&BuildRecord::new(remaining))?;
  }

  Ok(Outcome::Completed(CleanReport {
    units: selected,
    files_removed,
  }))
}
