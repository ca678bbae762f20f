//! Deployment descriptor types.
//!
//! Only the fields the pipeline reads or patches are typed. Everything else
//! is kept in `extra` maps so a load/patch/save cycle leaves the rest of the
//! descriptor intact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Fields the descriptor carries that this tool does not interpret.
pub type Extra = BTreeMap<String, Value>;

/// A parsed `serverless.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
  #[serde(default)]
  pub provider: Provider,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub custom: Option<Custom>,

  /// Declared functions keyed by name.
  #[serde(default)]
  pub functions: BTreeMap<String, FunctionDef>,

  #[serde(flatten)]
  pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Provider {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,

  /// Global default runtime, used by functions that do not declare their own.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub runtime: Option<String>,

  #[serde(flatten)]
  pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Custom {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rust: Option<RustSettings>,

  #[serde(flatten)]
  pub extra: Extra,
}

/// Service-wide `custom.rust` settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RustSettings {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile: Option<String>,

  /// Extra arguments appended to every `cargo build`, whitespace separated.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cargo_flags: Option<String>,

  #[serde(flatten)]
  pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDef {
  /// `package[.binary]`
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub handler: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub runtime: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub rust: Option<FunctionRust>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub package: Option<PackageDef>,

  #[serde(flatten)]
  pub extra: Extra,
}

/// Per-function `rust` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionRust {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile: Option<String>,

  #[serde(flatten)]
  pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageDef {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub artifact: Option<String>,

  #[serde(flatten)]
  pub extra: Extra,
}

impl ServiceConfig {
  pub fn provider_name(&self) -> Option<&str> {
    self.provider.name.as_deref()
  }

  pub fn rust_settings(&self) -> Option<&RustSettings> {
    self.custom.as_ref().and_then(|c| c.rust.as_ref())
  }

  /// Service-wide default profile from `custom.rust.profile`.
  pub fn default_profile(&self) -> Option<&str> {
    self.rust_settings().and_then(|r| r.profile.as_deref())
  }

  /// `custom.rust.cargoFlags` split into arguments.
  pub fn cargo_flags(&self) -> Vec<String> {
    self
      .rust_settings()
      .and_then(|r| r.cargo_flags.as_deref())
      .map(|flags| flags.split_whitespace().map(str::to_string).collect())
      .unwrap_or_default()
  }
}

impl FunctionDef {
  pub fn profile(&self) -> Option<&str> {
    self.rust.as_ref().and_then(|r| r.profile.as_deref())
  }
}
